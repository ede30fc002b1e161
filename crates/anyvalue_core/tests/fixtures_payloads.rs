#![allow(missing_docs)]

use anyvalue::dynamic::{DecodeOptions, DynamicValue, Error, ValueKind, ValuePath, from_json_slice, from_json_str, to_json_string};
use anyvalue_testkit::{fixture_json, fixture_text};

#[test]
fn file_listing_decodes_with_per_field_kinds() {
	let value = from_json_str(&fixture_text("file_listing.json"), &DecodeOptions::default()).expect("fixture decodes");

	assert_eq!(value.get("total_count"), Some(&DynamicValue::Integer(3)));
	let entries = value.get("entries").and_then(DynamicValue::as_sequence).expect("entries is a sequence");
	assert_eq!(entries.len(), 3);

	let kinds: Vec<&str> = entries.iter().filter_map(|entry| entry.get("type")).filter_map(DynamicValue::as_str).collect();
	assert_eq!(kinds, ["file", "folder", "web_link"]);

	let score = ValuePath::parse("entries[0].metadata.enterprise.review.score").expect("path parses");
	assert_eq!(value.lookup(&score), Some(&DynamicValue::FloatingPoint(4.5)));

	let empty_tags = ValuePath::parse("entries[1].tags").expect("path parses");
	assert_eq!(value.lookup(&empty_tags), Some(&DynamicValue::Sequence(Vec::new())));
	let empty_meta = ValuePath::parse("entries[1].metadata").expect("path parses");
	assert!(value.lookup(&empty_meta).is_some_and(DynamicValue::is_empty_container));
}

#[test]
fn file_listing_reencodes_to_equivalent_json() {
	let value = from_json_str(&fixture_text("file_listing.json"), &DecodeOptions::default()).expect("fixture decodes");
	let encoded = to_json_string(&value).expect("encode succeeds");
	let reparsed: serde_json::Value = serde_json::from_str(&encoded).expect("output is json");
	assert_eq!(reparsed, fixture_json("file_listing.json"));

	let again = from_json_str(&encoded, &DecodeOptions::default()).expect("re-decode succeeds");
	assert_eq!(again, value);
}

#[test]
fn null_field_fails_at_its_path() {
	let err = from_json_slice(fixture_text("null_field.json").as_bytes(), &DecodeOptions::default()).expect_err("null field fails");
	match err {
		Error::DataCorrupted { path, .. } => assert_eq!(path.to_string(), "$.owner.avatar_url"),
		other => panic!("expected data corrupted error, got {other}"),
	}
}

#[test]
fn scalar_fixture_classifies_in_probe_order() {
	let value = from_json_str(&fixture_text("scalars.json"), &DecodeOptions::default()).expect("fixture decodes");
	let kinds: Vec<ValueKind> = value.as_sequence().expect("root is a sequence").iter().map(DynamicValue::kind).collect();
	assert_eq!(
		kinds,
		[
			ValueKind::Integer,
			ValueKind::Integer,
			ValueKind::FloatingPoint,
			ValueKind::FloatingPoint,
			ValueKind::Boolean,
			ValueKind::Boolean,
			ValueKind::Text,
			ValueKind::Text,
			ValueKind::Text,
			ValueKind::FloatingPoint,
		]
	);

	let coerced = from_json_str(&fixture_text("scalars.json"), &DecodeOptions::for_stringly_formats()).expect("fixture decodes");
	assert_eq!(coerced.get_index(3), Some(&DynamicValue::Integer(2)));
	assert_eq!(coerced.get_index(7), Some(&DynamicValue::Boolean(true)));
	assert_eq!(coerced.get_index(8), Some(&DynamicValue::Integer(42)));
}
