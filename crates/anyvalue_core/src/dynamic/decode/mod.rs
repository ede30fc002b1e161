use std::cell::RefCell;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::dynamic::{DynamicValue, Error, Mapping, PathStep, Result, ValuePath};

const NOTHING_SERIALIZABLE: &str = "the container contains nothing serializable";

/// Runtime limits and scalar classification switches for dynamic decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting; the root container sits at depth 0.
	pub max_depth: u32,
	/// Classify floats without a fractional part that fit `i64` as integers.
	pub integral_floats_as_integers: bool,
	/// Probe text scalars as integer, float, then boolean before keeping them as text.
	pub coerce_text_scalars: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 128,
			integral_floats_as_integers: false,
			coerce_text_scalars: false,
		}
	}
}

impl DecodeOptions {
	/// Trust the scalar kinds reported by the backend.
	pub fn strict() -> Self {
		Self::default()
	}

	/// Preset for backends that deliver every scalar as text (query strings, CSV cells).
	pub fn for_stringly_formats() -> Self {
		Self {
			integral_floats_as_integers: true,
			coerce_text_scalars: true,
			..Self::default()
		}
	}
}

/// Decode one value from any self-describing serde backend.
///
/// Unlike going through [`Deserialize`], failures detected by the decoder are returned as
/// structured [`Error`] variants with their path instead of the backend's stringified error.
pub fn decode_from<'de, D>(deserializer: D, opt: &DecodeOptions) -> Result<DynamicValue>
where
	D: Deserializer<'de>,
{
	let _span = tracing::trace_span!("dynamic_decode", max_depth = opt.max_depth).entered();
	let state = DecodeState::new(opt);
	match NodeSeed::root(&state).deserialize(deserializer) {
		Ok(value) => Ok(value),
		Err(err) => Err(state.take_failure().unwrap_or_else(|| Error::Format(err.to_string()))),
	}
}

/// [`DeserializeSeed`] carrying [`DecodeOptions`], for embedding dynamic decoding in other impls.
#[derive(Debug, Clone, Copy)]
pub struct DynamicValueSeed<'a> {
	options: &'a DecodeOptions,
}

impl<'a> DynamicValueSeed<'a> {
	/// Create a seed that decodes with `options`.
	pub fn new(options: &'a DecodeOptions) -> Self {
		Self { options }
	}
}

impl<'de> DeserializeSeed<'de> for DynamicValueSeed<'_> {
	type Value = DynamicValue;

	fn deserialize<D>(self, deserializer: D) -> std::result::Result<DynamicValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		let state = DecodeState::new(self.options);
		NodeSeed::root(&state).deserialize(deserializer)
	}
}

impl<'de> Deserialize<'de> for DynamicValue {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		DynamicValueSeed::new(&DecodeOptions::default()).deserialize(deserializer)
	}
}

/// Per-call decode state shared by every node of one tree.
struct DecodeState<'a> {
	options: &'a DecodeOptions,
	path: RefCell<Vec<PathStep>>,
	failure: RefCell<Option<Error>>,
}

impl<'a> DecodeState<'a> {
	fn new(options: &'a DecodeOptions) -> Self {
		Self {
			options,
			path: RefCell::new(Vec::new()),
			failure: RefCell::new(None),
		}
	}

	fn current_path(&self) -> ValuePath {
		ValuePath {
			steps: self.path.borrow().clone(),
		}
	}

	/// Run `f` with `step` appended to the current path.
	fn with_step<T>(&self, step: PathStep, f: impl FnOnce() -> T) -> T {
		self.path.borrow_mut().push(step);
		let out = f();
		self.path.borrow_mut().pop();
		out
	}

	/// Record a structured failure at the current path and convert it for the backend.
	fn fail<E: de::Error>(&self, make: impl FnOnce(ValuePath) -> Error) -> E {
		let err = make(self.current_path());
		tracing::debug!(error = %err, "dynamic decode rejected node");
		let out = E::custom(&err);
		*self.failure.borrow_mut() = Some(err);
		out
	}

	fn corrupted<E: de::Error>(&self, reason: &str) -> E {
		self.fail(|path| Error::DataCorrupted {
			path,
			reason: reason.to_owned(),
		})
	}

	fn take_failure(&self) -> Option<Error> {
		self.failure.borrow_mut().take()
	}
}

#[derive(Clone, Copy)]
struct NodeSeed<'s, 'a> {
	state: &'s DecodeState<'a>,
	depth: u32,
}

impl<'s, 'a> NodeSeed<'s, 'a> {
	fn root(state: &'s DecodeState<'a>) -> Self {
		Self { state, depth: 0 }
	}
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_, '_> {
	type Value = DynamicValue;

	fn deserialize<D>(self, deserializer: D) -> std::result::Result<DynamicValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(NodeVisitor {
			state: self.state,
			depth: self.depth,
		})
	}
}

#[derive(Clone, Copy)]
struct NodeVisitor<'s, 'a> {
	state: &'s DecodeState<'a>,
	depth: u32,
}

impl<'s, 'a> NodeVisitor<'s, 'a> {
	fn child(&self) -> NodeSeed<'s, 'a> {
		NodeSeed {
			state: self.state,
			depth: self.depth + 1,
		}
	}

	fn enter_container<E: de::Error>(&self) -> std::result::Result<(), E> {
		let max_depth = self.state.options.max_depth;
		if self.depth >= max_depth {
			return Err(self.state.fail(|path| Error::DepthExceeded { path, max_depth }));
		}
		Ok(())
	}

	fn float(&self, value: f64) -> DynamicValue {
		if self.state.options.integral_floats_as_integers
			&& let Some(integer) = integral_f64(value)
		{
			return DynamicValue::Integer(integer);
		}
		DynamicValue::FloatingPoint(value)
	}

	fn text(&self, value: String) -> DynamicValue {
		if !self.state.options.coerce_text_scalars {
			return DynamicValue::Text(value);
		}
		if let Ok(integer) = value.parse::<i64>() {
			return DynamicValue::Integer(integer);
		}
		if let Ok(float) = value.parse::<f64>()
			&& float.is_finite()
		{
			return self.float(float);
		}
		match value.as_str() {
			"true" => DynamicValue::Boolean(true),
			"false" => DynamicValue::Boolean(false),
			_ => DynamicValue::Text(value),
		}
	}
}

impl<'de> Visitor<'de> for NodeVisitor<'_, '_> {
	type Value = DynamicValue;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a mapping, sequence, integer, float, boolean, or string")
	}

	fn visit_map<A>(self, mut map: A) -> std::result::Result<DynamicValue, A::Error>
	where
		A: MapAccess<'de>,
	{
		self.enter_container::<A::Error>()?;
		let mut entries = Mapping::new();
		while let Some(key) = map.next_key_seed(KeySeed { state: self.state })? {
			let value = self.state.with_step(PathStep::Key(key.clone()), || map.next_value_seed(self.child()))?;
			entries.insert(key, value);
		}
		Ok(DynamicValue::Mapping(entries))
	}

	fn visit_seq<A>(self, mut seq: A) -> std::result::Result<DynamicValue, A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.enter_container::<A::Error>()?;
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
		loop {
			let next = self.state.with_step(PathStep::Index(items.len()), || seq.next_element_seed(self.child()))?;
			match next {
				Some(item) => items.push(item),
				None => break,
			}
		}
		Ok(DynamicValue::Sequence(items))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<DynamicValue, E> {
		Ok(DynamicValue::Integer(value))
	}

	fn visit_i128<E: de::Error>(self, value: i128) -> std::result::Result<DynamicValue, E> {
		match i64::try_from(value) {
			Ok(integer) => Ok(DynamicValue::Integer(integer)),
			Err(_) => Ok(DynamicValue::FloatingPoint(value as f64)),
		}
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<DynamicValue, E> {
		match i64::try_from(value) {
			Ok(integer) => Ok(DynamicValue::Integer(integer)),
			Err(_) => Ok(DynamicValue::FloatingPoint(value as f64)),
		}
	}

	fn visit_u128<E: de::Error>(self, value: u128) -> std::result::Result<DynamicValue, E> {
		match i64::try_from(value) {
			Ok(integer) => Ok(DynamicValue::Integer(integer)),
			Err(_) => Ok(DynamicValue::FloatingPoint(value as f64)),
		}
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<DynamicValue, E> {
		Ok(self.float(value))
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<DynamicValue, E> {
		Ok(DynamicValue::Boolean(value))
	}

	fn visit_char<E: de::Error>(self, value: char) -> std::result::Result<DynamicValue, E> {
		Ok(self.text(value.to_string()))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<DynamicValue, E> {
		Ok(self.text(value.to_owned()))
	}

	fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<DynamicValue, E> {
		Ok(self.text(value))
	}

	fn visit_bytes<E: de::Error>(self, _value: &[u8]) -> std::result::Result<DynamicValue, E> {
		Err(self.state.corrupted(NOTHING_SERIALIZABLE))
	}

	fn visit_none<E: de::Error>(self) -> std::result::Result<DynamicValue, E> {
		Err(self.state.corrupted("could not decode a value: found null"))
	}

	fn visit_unit<E: de::Error>(self) -> std::result::Result<DynamicValue, E> {
		Err(self.state.corrupted("could not decode a value: found null"))
	}

	fn visit_some<D>(self, deserializer: D) -> std::result::Result<DynamicValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}

	fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<DynamicValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}

	fn visit_enum<A>(self, _data: A) -> std::result::Result<DynamicValue, A::Error>
	where
		A: EnumAccess<'de>,
	{
		Err(self.state.corrupted(NOTHING_SERIALIZABLE))
	}
}

/// Decodes a mapping key into its string form.
struct KeySeed<'s, 'a> {
	state: &'s DecodeState<'a>,
}

impl<'de> DeserializeSeed<'de> for KeySeed<'_, '_> {
	type Value = String;

	fn deserialize<D>(self, deserializer: D) -> std::result::Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(KeyVisitor { state: self.state })
	}
}

struct KeyVisitor<'s, 'a> {
	state: &'s DecodeState<'a>,
}

impl KeyVisitor<'_, '_> {
	fn reject<E: de::Error>(&self, found: &str) -> E {
		self.state.corrupted(&format!("mapping key must be string-like, found {found}"))
	}
}

impl<'de> Visitor<'de> for KeyVisitor<'_, '_> {
	type Value = String;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a string, integer, boolean, or char mapping key")
	}

	fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<String, E> {
		Ok(value.to_owned())
	}

	fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<String, E> {
		Ok(value)
	}

	fn visit_char<E: de::Error>(self, value: char) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_i128<E: de::Error>(self, value: i128) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_u128<E: de::Error>(self, value: u128) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<String, E> {
		Ok(value.to_string())
	}

	fn visit_f64<E: de::Error>(self, _value: f64) -> std::result::Result<String, E> {
		Err(self.reject("float"))
	}

	fn visit_bytes<E: de::Error>(self, _value: &[u8]) -> std::result::Result<String, E> {
		Err(self.reject("bytes"))
	}

	fn visit_none<E: de::Error>(self) -> std::result::Result<String, E> {
		Err(self.reject("null"))
	}

	fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
		Err(self.reject("null"))
	}

	fn visit_some<D>(self, deserializer: D) -> std::result::Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}

	fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}

	fn visit_seq<A>(self, _seq: A) -> std::result::Result<String, A::Error>
	where
		A: SeqAccess<'de>,
	{
		Err(self.reject("sequence"))
	}

	fn visit_map<A>(self, _map: A) -> std::result::Result<String, A::Error>
	where
		A: MapAccess<'de>,
	{
		Err(self.reject("mapping"))
	}

	fn visit_enum<A>(self, _data: A) -> std::result::Result<String, A::Error>
	where
		A: EnumAccess<'de>,
	{
		Err(self.reject("enum"))
	}
}

/// Exact integer value of `value`, if it has no fractional part and fits `i64`.
fn integral_f64(value: f64) -> Option<i64> {
	const LIMIT: f64 = 9_223_372_036_854_775_808.0;
	if value.is_finite() && value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
		Some(value as i64)
	} else {
		None
	}
}
