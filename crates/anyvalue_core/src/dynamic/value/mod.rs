use std::collections::BTreeMap;
use std::fmt;

use crate::dynamic::{PathStep, ValuePath};

/// Key/value payload of [`DynamicValue::Mapping`].
pub type Mapping = BTreeMap<String, DynamicValue>;

/// Runtime value whose shape is only known after decoding.
///
/// Each instance owns its children; the structure is always a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
	/// String-keyed record with unique keys.
	Mapping(Mapping),
	/// Ordered list of values.
	Sequence(Vec<DynamicValue>),
	/// Signed 64-bit integer scalar.
	Integer(i64),
	/// Double-precision float scalar.
	FloatingPoint(f64),
	/// Boolean scalar.
	Boolean(bool),
	/// UTF-8 string scalar.
	Text(String),
}

/// Variant tag of a [`DynamicValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
	/// Keyed container.
	Mapping,
	/// Indexed container.
	Sequence,
	/// Integer scalar.
	Integer,
	/// Float scalar.
	FloatingPoint,
	/// Boolean scalar.
	Boolean,
	/// String scalar.
	Text,
}

impl ValueKind {
	/// Every kind in declaration order.
	pub const ALL: [ValueKind; 6] = [
		ValueKind::Mapping,
		ValueKind::Sequence,
		ValueKind::Integer,
		ValueKind::FloatingPoint,
		ValueKind::Boolean,
		ValueKind::Text,
	];

	/// Stable lowercase label.
	pub fn name(self) -> &'static str {
		match self {
			ValueKind::Mapping => "mapping",
			ValueKind::Sequence => "sequence",
			ValueKind::Integer => "integer",
			ValueKind::FloatingPoint => "float",
			ValueKind::Boolean => "boolean",
			ValueKind::Text => "text",
		}
	}

	/// Whether values of this kind hold children.
	pub fn is_container(self) -> bool {
		matches!(self, ValueKind::Mapping | ValueKind::Sequence)
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl DynamicValue {
	/// Variant tag of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			DynamicValue::Mapping(_) => ValueKind::Mapping,
			DynamicValue::Sequence(_) => ValueKind::Sequence,
			DynamicValue::Integer(_) => ValueKind::Integer,
			DynamicValue::FloatingPoint(_) => ValueKind::FloatingPoint,
			DynamicValue::Boolean(_) => ValueKind::Boolean,
			DynamicValue::Text(_) => ValueKind::Text,
		}
	}

	/// Integer payload, if this is an integer.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			DynamicValue::Integer(value) => Some(*value),
			_ => None,
		}
	}

	/// Numeric payload as `f64`; integers widen.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			DynamicValue::FloatingPoint(value) => Some(*value),
			DynamicValue::Integer(value) => Some(*value as f64),
			_ => None,
		}
	}

	/// Boolean payload, if this is a boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			DynamicValue::Boolean(value) => Some(*value),
			_ => None,
		}
	}

	/// String payload, if this is text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			DynamicValue::Text(value) => Some(value),
			_ => None,
		}
	}

	/// Elements, if this is a sequence.
	pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
		match self {
			DynamicValue::Sequence(items) => Some(items),
			_ => None,
		}
	}

	/// Entries, if this is a mapping.
	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			DynamicValue::Mapping(entries) => Some(entries),
			_ => None,
		}
	}

	/// Mapping entry by key.
	pub fn get(&self, key: &str) -> Option<&DynamicValue> {
		self.as_mapping().and_then(|entries| entries.get(key))
	}

	/// Sequence element by index.
	pub fn get_index(&self, index: usize) -> Option<&DynamicValue> {
		self.as_sequence().and_then(|items| items.get(index))
	}

	/// Resolve a path against this value.
	pub fn lookup(&self, path: &ValuePath) -> Option<&DynamicValue> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Key(key) => current.get(key)?,
				PathStep::Index(index) => current.get_index(*index)?,
			};
		}
		Some(current)
	}

	/// Whether this is a container with no children.
	pub fn is_empty_container(&self) -> bool {
		match self {
			DynamicValue::Mapping(entries) => entries.is_empty(),
			DynamicValue::Sequence(items) => items.is_empty(),
			_ => false,
		}
	}

	/// Container nesting depth: scalars are 0, a container is one more than its deepest child.
	pub fn depth(&self) -> usize {
		match self {
			DynamicValue::Mapping(entries) => 1 + entries.values().map(DynamicValue::depth).max().unwrap_or(0),
			DynamicValue::Sequence(items) => 1 + items.iter().map(DynamicValue::depth).max().unwrap_or(0),
			_ => 0,
		}
	}
}

impl fmt::Display for DynamicValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
		f.write_str(&rendered)
	}
}

impl From<i64> for DynamicValue {
	fn from(value: i64) -> Self {
		DynamicValue::Integer(value)
	}
}

impl From<i32> for DynamicValue {
	fn from(value: i32) -> Self {
		DynamicValue::Integer(i64::from(value))
	}
}

impl From<u32> for DynamicValue {
	fn from(value: u32) -> Self {
		DynamicValue::Integer(i64::from(value))
	}
}

impl From<f64> for DynamicValue {
	fn from(value: f64) -> Self {
		DynamicValue::FloatingPoint(value)
	}
}

impl From<f32> for DynamicValue {
	fn from(value: f32) -> Self {
		DynamicValue::FloatingPoint(f64::from(value))
	}
}

impl From<bool> for DynamicValue {
	fn from(value: bool) -> Self {
		DynamicValue::Boolean(value)
	}
}

impl From<String> for DynamicValue {
	fn from(value: String) -> Self {
		DynamicValue::Text(value)
	}
}

impl From<&str> for DynamicValue {
	fn from(value: &str) -> Self {
		DynamicValue::Text(value.to_owned())
	}
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
	fn from(items: Vec<T>) -> Self {
		DynamicValue::Sequence(items.into_iter().map(Into::into).collect())
	}
}

impl From<Mapping> for DynamicValue {
	fn from(entries: Mapping) -> Self {
		DynamicValue::Mapping(entries)
	}
}

impl FromIterator<DynamicValue> for DynamicValue {
	fn from_iter<I: IntoIterator<Item = DynamicValue>>(iter: I) -> Self {
		DynamicValue::Sequence(iter.into_iter().collect())
	}
}

impl<K: Into<String>, V: Into<DynamicValue>> FromIterator<(K, V)> for DynamicValue {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		DynamicValue::Mapping(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
