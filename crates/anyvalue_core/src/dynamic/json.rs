use std::io::Read;

use serde::Serialize;

use crate::dynamic::{DecodeOptions, DynamicValue, Error, PathStep, Result, ValuePath, decode_from, to_dynamic};

// serde_json's own recursion limit is disabled in the readers below; `DecodeOptions::max_depth`
// bounds nesting instead and fails before the backend recurses past it.

/// Decode a JSON document held in a string.
pub fn from_json_str(input: &str, opt: &DecodeOptions) -> Result<DynamicValue> {
	let mut de = serde_json::Deserializer::from_str(input);
	de.disable_recursion_limit();
	let value = decode_from(&mut de, opt)?;
	de.end()?;
	Ok(value)
}

/// Decode a JSON document held in a byte slice.
pub fn from_json_slice(input: &[u8], opt: &DecodeOptions) -> Result<DynamicValue> {
	let mut de = serde_json::Deserializer::from_slice(input);
	de.disable_recursion_limit();
	let value = decode_from(&mut de, opt)?;
	de.end()?;
	Ok(value)
}

/// Decode a JSON document from a reader.
pub fn from_json_reader<R: Read>(reader: R, opt: &DecodeOptions) -> Result<DynamicValue> {
	let mut de = serde_json::Deserializer::from_reader(reader);
	de.disable_recursion_limit();
	let value = decode_from(&mut de, opt)?;
	de.end()?;
	Ok(value)
}

/// Encode as compact JSON.
///
/// Fails with [`Error::InvalidValue`] when the tree holds a NaN or infinite float.
pub fn to_json_string(value: &DynamicValue) -> Result<String> {
	ensure_json_floats(value)?;
	Ok(serde_json::to_string(value)?)
}

/// Encode as indented JSON.
pub fn to_json_string_pretty(value: &DynamicValue) -> Result<String> {
	ensure_json_floats(value)?;
	Ok(serde_json::to_string_pretty(value)?)
}

/// Wrap a native value and encode it as compact JSON, keeping structured wrap errors.
pub fn native_to_json_string<T>(value: &T) -> Result<String>
where
	T: ?Sized + Serialize,
{
	to_json_string(&to_dynamic(value)?)
}

impl TryFrom<serde_json::Value> for DynamicValue {
	type Error = Error;

	fn try_from(value: serde_json::Value) -> Result<Self> {
		decode_from(value, &DecodeOptions::default())
	}
}

impl TryFrom<DynamicValue> for serde_json::Value {
	type Error = Error;

	fn try_from(value: DynamicValue) -> Result<Self> {
		ensure_json_floats(&value)?;
		Ok(json_value(value))
	}
}

fn json_value(value: DynamicValue) -> serde_json::Value {
	match value {
		DynamicValue::Mapping(entries) => serde_json::Value::Object(entries.into_iter().map(|(key, value)| (key, json_value(value))).collect()),
		DynamicValue::Sequence(items) => serde_json::Value::Array(items.into_iter().map(json_value).collect()),
		DynamicValue::Integer(value) => serde_json::Value::from(value),
		// finite, checked by `ensure_json_floats`
		DynamicValue::FloatingPoint(value) => serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number),
		DynamicValue::Boolean(value) => serde_json::Value::Bool(value),
		DynamicValue::Text(value) => serde_json::Value::String(value),
	}
}

/// JSON has no NaN or infinity; serde_json would write them as `null`, which never decodes back.
fn ensure_json_floats(value: &DynamicValue) -> Result<()> {
	match non_finite_float(value) {
		Some((path, float)) => Err(Error::InvalidValue {
			path,
			reason: format!("non-finite float {float} is not representable in JSON"),
		}),
		None => Ok(()),
	}
}

fn non_finite_float(value: &DynamicValue) -> Option<(ValuePath, f64)> {
	let (step, (mut path, float)) = match value {
		DynamicValue::FloatingPoint(float) if !float.is_finite() => return Some((ValuePath::root(), *float)),
		DynamicValue::Mapping(entries) => entries
			.iter()
			.find_map(|(key, item)| non_finite_float(item).map(|found| (PathStep::Key(key.clone()), found)))?,
		DynamicValue::Sequence(items) => items
			.iter()
			.enumerate()
			.find_map(|(index, item)| non_finite_float(item).map(|found| (PathStep::Index(index), found)))?,
		_ => return None,
	};
	path.steps.insert(0, step);
	Some((path, float))
}
