use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::dynamic::{DynamicValue, Error, ValuePath, from_json_str, to_dynamic, to_json_string};

#[derive(Serialize)]
struct Upload {
	id: u32,
	name: String,
	size: Option<u64>,
	ratio: f32,
	tags: Vec<&'static str>,
	owner: Owner,
}

#[derive(Serialize)]
struct Owner {
	login: String,
	admin: bool,
}

#[derive(Serialize)]
enum Mode {
	Fast,
}

#[derive(Serialize)]
struct WithMode {
	label: &'static str,
	mode: Mode,
}

struct Blob;

impl Serialize for Blob {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_bytes(&[1, 2, 3])
	}
}

fn invalid_parts(err: Error) -> (ValuePath, String) {
	match err {
		Error::InvalidValue { path, reason } => (path, reason),
		other => panic!("expected invalid value error, got {other}"),
	}
}

#[test]
fn wraps_native_struct_tree() {
	let upload = Upload {
		id: 12,
		name: "scan.png".into(),
		size: Some(2048),
		ratio: 0.5,
		tags: vec!["image", "inbox"],
		owner: Owner {
			login: "kim".into(),
			admin: false,
		},
	};

	let value = DynamicValue::wrap(&upload).expect("wrap succeeds");
	assert_eq!(value.get("id"), Some(&DynamicValue::Integer(12)));
	assert_eq!(value.get("size"), Some(&DynamicValue::Integer(2048)));
	assert_eq!(value.get("ratio"), Some(&DynamicValue::FloatingPoint(0.5)));
	assert_eq!(value.get("tags").and_then(|tags| tags.get_index(1)), Some(&DynamicValue::Text("inbox".into())));
	assert_eq!(value.get("owner").and_then(|owner| owner.get("admin")), Some(&DynamicValue::Boolean(false)));
}

#[test]
fn wrapped_values_round_trip_through_json() {
	let native = (1_i64, "two", [3.5_f64, 4.25], true);
	let wrapped = to_dynamic(&native).expect("wrap succeeds");
	let encoded = to_json_string(&wrapped).expect("encode succeeds");
	let decoded = from_json_str(&encoded, &Default::default()).expect("decode succeeds");
	assert_eq!(decoded, wrapped);
}

#[test]
fn unit_root_fails_with_root_path() {
	let (path, reason) = invalid_parts(to_dynamic(&()).expect_err("unit is not encodable"));
	assert!(path.is_root());
	assert!(reason.contains("unit"), "unexpected reason: {reason}");
}

#[test]
fn none_inside_sequence_reports_index() {
	let (path, _) = invalid_parts(to_dynamic(&vec![Some(1), None]).expect_err("none is not encodable"));
	assert_eq!(path.to_string(), "$[1]");
}

#[test]
fn enum_variants_are_rejected_by_name() {
	let value = WithMode {
		label: "job",
		mode: Mode::Fast,
	};
	let (path, reason) = invalid_parts(to_dynamic(&value).expect_err("enum is not encodable"));
	assert_eq!(path.to_string(), "$.mode");
	assert!(reason.contains("Mode::Fast"), "unexpected reason: {reason}");
}

#[test]
fn integers_outside_i64_are_rejected() {
	assert_eq!(to_dynamic(&(i64::MAX as u64)).expect("fits"), DynamicValue::Integer(i64::MAX));

	let (path, reason) = invalid_parts(to_dynamic(&u64::MAX).expect_err("u64::MAX does not fit"));
	assert!(path.is_root());
	assert!(reason.contains("18446744073709551615"), "unexpected reason: {reason}");
}

#[test]
fn byte_strings_are_rejected() {
	let (_, reason) = invalid_parts(to_dynamic(&Blob).expect_err("bytes are not encodable"));
	assert!(reason.contains("3 bytes"), "unexpected reason: {reason}");
}

#[test]
fn map_keys_are_stringified_or_rejected() {
	let mut numbered = BTreeMap::new();
	numbered.insert(7_u16, "seven");
	let value = to_dynamic(&numbered).expect("integer keys wrap");
	assert_eq!(value.get("7"), Some(&DynamicValue::Text("seven".into())));

	let mut nested = BTreeMap::new();
	nested.insert(vec![1_u8], 1_i32);
	let (path, reason) = invalid_parts(to_dynamic(&nested).expect_err("sequence keys are not encodable"));
	assert!(path.is_root());
	assert!(reason.contains("sequence"), "unexpected reason: {reason}");
}

#[test]
fn chars_and_newtypes_are_transparent() {
	#[derive(Serialize)]
	struct Meters(f64);

	assert_eq!(to_dynamic(&'x').expect("char wraps"), DynamicValue::Text("x".into()));
	assert_eq!(to_dynamic(&Meters(1.5)).expect("newtype wraps"), DynamicValue::FloatingPoint(1.5));
}
