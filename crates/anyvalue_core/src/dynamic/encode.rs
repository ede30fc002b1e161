use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::dynamic::{DynamicValue, to_dynamic};

impl Serialize for DynamicValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			DynamicValue::Sequence(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			DynamicValue::Mapping(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			DynamicValue::Integer(value) => serializer.serialize_i64(*value),
			DynamicValue::FloatingPoint(value) => serializer.serialize_f64(*value),
			DynamicValue::Boolean(value) => serializer.serialize_bool(*value),
			DynamicValue::Text(value) => serializer.serialize_str(value),
		}
	}
}

/// Wrap a native value and encode it through `serializer`.
///
/// The whole value is wrapped before anything is written, so an unsupported payload
/// fails without emitting partial output.
pub fn encode_native<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
	T: ?Sized + Serialize,
	S: Serializer,
{
	let wrapped = to_dynamic(value).map_err(S::Error::custom)?;
	wrapped.serialize(serializer)
}
