use anyvalue::dynamic::{DecodeOptions, DynamicValue, Error, ValuePath, from_json_str};

use super::select;
use crate::cmd::test_support::{fixture_arg, run_anyvalue};

#[test]
fn select_walks_keys_and_indices() {
	let value = from_json_str(r#"{"a":{"b":[10,20,30]}}"#, &DecodeOptions::default()).expect("decode succeeds");
	let target = ValuePath::parse("a.b[2]").expect("path parses");
	assert_eq!(select(&value, &target).expect("path resolves"), &DynamicValue::Integer(30));
}

#[test]
fn select_reports_missing_paths() {
	let value = from_json_str(r#"{"a":[1]}"#, &DecodeOptions::default()).expect("decode succeeds");
	let target = ValuePath::parse("a[3]").expect("path parses");
	match select(&value, &target) {
		Err(Error::PathNotFound { path }) => assert_eq!(path, "$.a[3]"),
		other => panic!("expected missing path, got {other:?}"),
	}
}

#[test]
fn get_prints_selected_subtree() {
	let fixture = fixture_arg("file_listing.json");
	let output = run_anyvalue(&["get", &fixture, "--path", "entries[0].metadata.enterprise.review.score", "--compact"]);

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "4.5");
}

#[test]
fn get_missing_path_exits_with_error() {
	let fixture = fixture_arg("file_listing.json");
	let output = run_anyvalue(&["get", &fixture, "--path", "entries[9]"]);

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: "), "unexpected stderr: {stderr}");
	assert!(stderr.contains("entries[9]"), "unexpected stderr: {stderr}");
}
