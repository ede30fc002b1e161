#![allow(missing_docs)]

use anyvalue::dynamic::{DecodeOptions, DynamicValue, from_json_str, to_json_string, to_json_string_pretty};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = DynamicValue> {
	let leaf = prop_oneof![
		any::<i64>().prop_map(DynamicValue::Integer),
		any::<f64>().prop_filter("json has no non-finite floats", |value| value.is_finite()).prop_map(DynamicValue::FloatingPoint),
		any::<bool>().prop_map(DynamicValue::Boolean),
		".{0,12}".prop_map(DynamicValue::Text),
	];

	leaf.prop_recursive(4, 64, 6, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..6).prop_map(DynamicValue::Sequence),
			prop::collection::btree_map(".{0,8}", inner, 0..6).prop_map(DynamicValue::Mapping),
		]
	})
}

proptest! {
	#[test]
	fn decode_of_encode_reproduces_tree(value in arb_value()) {
		let encoded = to_json_string(&value).expect("encode succeeds");
		let decoded = from_json_str(&encoded, &DecodeOptions::default()).expect("decode succeeds");
		prop_assert_eq!(decoded, value);
	}

	#[test]
	fn pretty_and_compact_decode_alike(value in arb_value()) {
		let compact = to_json_string(&value).expect("encode succeeds");
		let pretty = to_json_string_pretty(&value).expect("encode succeeds");
		let opt = DecodeOptions::default();
		prop_assert_eq!(
			from_json_str(&compact, &opt).expect("compact decodes"),
			from_json_str(&pretty, &opt).expect("pretty decodes")
		);
	}

	#[test]
	fn whole_numbers_never_decode_as_floats(number in any::<i64>()) {
		let decoded = from_json_str(&number.to_string(), &DecodeOptions::default()).expect("decode succeeds");
		prop_assert_eq!(decoded, DynamicValue::Integer(number));
	}
}
