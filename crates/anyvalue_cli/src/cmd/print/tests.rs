use anyvalue::dynamic::{DynamicValue, Mapping};

use super::{PrintOptions, render_value, truncate};

fn sample() -> DynamicValue {
	[
		("count", DynamicValue::Integer(2)),
		("ratio", DynamicValue::FloatingPoint(2.0)),
		("tags", DynamicValue::from(vec!["a", "b", "c"])),
		("empty", DynamicValue::Mapping(Mapping::new())),
	]
	.into_iter()
	.collect()
}

#[test]
fn render_labels_scalar_kinds() {
	let out = render_value(&sample(), PrintOptions::default());
	assert!(out.contains("count = 2 (integer)"), "{out}");
	assert!(out.contains("ratio = 2.0 (float)"), "{out}");
	assert!(out.contains("\"b\" (text)"), "{out}");
	assert!(out.contains("empty = {}"), "{out}");
}

#[test]
fn render_respects_item_and_depth_limits() {
	let options = PrintOptions {
		max_array_items: 1,
		..PrintOptions::default()
	};
	let out = render_value(&sample(), options);
	assert!(out.contains("... 2 more"), "{out}");

	let shallow = PrintOptions {
		max_print_depth: 0,
		..PrintOptions::default()
	};
	assert_eq!(render_value(&sample(), shallow), "{ ... 4 entries }\n");
}

#[test]
fn truncate_counts_unicode_scalars() {
	assert_eq!(truncate("héllo", 5), "héllo");
	assert_eq!(truncate("héllo", 2), "hé...");
}
