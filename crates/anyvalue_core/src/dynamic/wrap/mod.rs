use serde::ser::{
	Impossible, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeTuple, SerializeTupleStruct, Serializer,
};

use crate::dynamic::{DynamicValue, Error, Mapping, Result, ValuePath};

/// Wrap a native value as a [`DynamicValue`].
///
/// Walks the serde data model of `value`. Integers that fit `i64`, floats, booleans, chars,
/// strings, sequences, tuples, maps, and structs are accepted; `Some` and newtype wrappers are
/// transparent. Anything else fails with [`Error::InvalidValue`] at the offending path.
pub fn to_dynamic<T>(value: &T) -> Result<DynamicValue>
where
	T: ?Sized + Serialize,
{
	value.serialize(WrapSerializer { path: ValuePath::root() })
}

impl DynamicValue {
	/// Wrap a native value; see [`to_dynamic`].
	pub fn wrap<T>(value: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		to_dynamic(value)
	}
}

fn reject(path: ValuePath, what: String) -> Error {
	let err = Error::InvalidValue {
		path,
		reason: format!("{what} is not encodable"),
	};
	tracing::debug!(error = %err, "dynamic wrap rejected value");
	err
}

struct WrapSerializer {
	path: ValuePath,
}

impl WrapSerializer {
	fn reject(self, what: impl Into<String>) -> Error {
		reject(self.path, what.into())
	}

	fn integer<I>(self, value: I) -> Result<DynamicValue>
	where
		I: Copy + std::fmt::Display,
		i64: TryFrom<I>,
	{
		match i64::try_from(value) {
			Ok(integer) => Ok(DynamicValue::Integer(integer)),
			Err(_) => Err(self.reject(format!("integer {value} outside the 64-bit signed range"))),
		}
	}
}

impl Serializer for WrapSerializer {
	type Ok = DynamicValue;
	type Error = Error;

	type SerializeSeq = SeqWrap;
	type SerializeTuple = SeqWrap;
	type SerializeTupleStruct = SeqWrap;
	type SerializeTupleVariant = Impossible<DynamicValue, Error>;
	type SerializeMap = MapWrap;
	type SerializeStruct = MapWrap;
	type SerializeStructVariant = Impossible<DynamicValue, Error>;

	fn serialize_bool(self, value: bool) -> Result<DynamicValue> {
		Ok(DynamicValue::Boolean(value))
	}

	fn serialize_i8(self, value: i8) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_i16(self, value: i16) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_i32(self, value: i32) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_i64(self, value: i64) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(value))
	}

	fn serialize_i128(self, value: i128) -> Result<DynamicValue> {
		self.integer(value)
	}

	fn serialize_u8(self, value: u8) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_u16(self, value: u16) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_u32(self, value: u32) -> Result<DynamicValue> {
		Ok(DynamicValue::Integer(i64::from(value)))
	}

	fn serialize_u64(self, value: u64) -> Result<DynamicValue> {
		self.integer(value)
	}

	fn serialize_u128(self, value: u128) -> Result<DynamicValue> {
		self.integer(value)
	}

	fn serialize_f32(self, value: f32) -> Result<DynamicValue> {
		Ok(DynamicValue::FloatingPoint(f64::from(value)))
	}

	fn serialize_f64(self, value: f64) -> Result<DynamicValue> {
		Ok(DynamicValue::FloatingPoint(value))
	}

	fn serialize_char(self, value: char) -> Result<DynamicValue> {
		Ok(DynamicValue::Text(value.to_string()))
	}

	fn serialize_str(self, value: &str) -> Result<DynamicValue> {
		Ok(DynamicValue::Text(value.to_owned()))
	}

	fn serialize_bytes(self, value: &[u8]) -> Result<DynamicValue> {
		Err(self.reject(format!("byte string of {} bytes", value.len())))
	}

	fn serialize_none(self) -> Result<DynamicValue> {
		Err(self.reject("`None`"))
	}

	fn serialize_some<T>(self, value: &T) -> Result<DynamicValue>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<DynamicValue> {
		Err(self.reject("unit `()`"))
	}

	fn serialize_unit_struct(self, name: &'static str) -> Result<DynamicValue> {
		Err(self.reject(format!("unit struct `{name}`")))
	}

	fn serialize_unit_variant(self, name: &'static str, _variant_index: u32, variant: &'static str) -> Result<DynamicValue> {
		Err(self.reject(format!("enum variant `{name}::{variant}`")))
	}

	fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<DynamicValue>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_newtype_variant<T>(self, name: &'static str, _variant_index: u32, variant: &'static str, _value: &T) -> Result<DynamicValue>
	where
		T: ?Sized + Serialize,
	{
		Err(self.reject(format!("enum variant `{name}::{variant}`")))
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<SeqWrap> {
		Ok(SeqWrap {
			path: self.path,
			items: Vec::with_capacity(len.unwrap_or(0)),
		})
	}

	fn serialize_tuple(self, len: usize) -> Result<SeqWrap> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqWrap> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		_len: usize,
	) -> Result<Impossible<DynamicValue, Error>> {
		Err(self.reject(format!("enum variant `{name}::{variant}`")))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<MapWrap> {
		Ok(MapWrap {
			path: self.path,
			entries: Mapping::new(),
			pending_key: None,
		})
	}

	fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapWrap> {
		self.serialize_map(Some(len))
	}

	fn serialize_struct_variant(
		self,
		name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		_len: usize,
	) -> Result<Impossible<DynamicValue, Error>> {
		Err(self.reject(format!("enum variant `{name}::{variant}`")))
	}
}

struct SeqWrap {
	path: ValuePath,
	items: Vec<DynamicValue>,
}

impl SerializeSeq for SeqWrap {
	type Ok = DynamicValue;
	type Error = Error;

	fn serialize_element<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		let path = self.path.child_index(self.items.len());
		self.items.push(value.serialize(WrapSerializer { path })?);
		Ok(())
	}

	fn end(self) -> Result<DynamicValue> {
		Ok(DynamicValue::Sequence(self.items))
	}
}

impl SerializeTuple for SeqWrap {
	type Ok = DynamicValue;
	type Error = Error;

	fn serialize_element<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		SerializeSeq::serialize_element(self, value)
	}

	fn end(self) -> Result<DynamicValue> {
		SerializeSeq::end(self)
	}
}

impl SerializeTupleStruct for SeqWrap {
	type Ok = DynamicValue;
	type Error = Error;

	fn serialize_field<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		SerializeSeq::serialize_element(self, value)
	}

	fn end(self) -> Result<DynamicValue> {
		SerializeSeq::end(self)
	}
}

struct MapWrap {
	path: ValuePath,
	entries: Mapping,
	pending_key: Option<String>,
}

impl MapWrap {
	fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		let path = self.path.child_key(&key);
		let value = value.serialize(WrapSerializer { path })?;
		self.entries.insert(key, value);
		Ok(())
	}
}

impl SerializeMap for MapWrap {
	type Ok = DynamicValue;
	type Error = Error;

	fn serialize_key<T>(&mut self, key: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.pending_key = Some(key.serialize(KeySerializer { path: self.path.clone() })?);
		Ok(())
	}

	fn serialize_value<T>(&mut self, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		let Some(key) = self.pending_key.take() else {
			return Err(reject(self.path.clone(), "mapping value without a key".to_owned()));
		};
		self.insert(key, value)
	}

	fn end(self) -> Result<DynamicValue> {
		Ok(DynamicValue::Mapping(self.entries))
	}
}

impl SerializeStruct for MapWrap {
	type Ok = DynamicValue;
	type Error = Error;

	fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
	where
		T: ?Sized + Serialize,
	{
		self.insert(key.to_owned(), value)
	}

	fn end(self) -> Result<DynamicValue> {
		SerializeMap::end(self)
	}
}

/// Serializes a mapping key into its string form.
struct KeySerializer {
	path: ValuePath,
}

impl KeySerializer {
	fn reject(self, what: &str) -> Error {
		reject(self.path, format!("mapping key of kind {what}"))
	}
}

impl Serializer for KeySerializer {
	type Ok = String;
	type Error = Error;

	type SerializeSeq = Impossible<String, Error>;
	type SerializeTuple = Impossible<String, Error>;
	type SerializeTupleStruct = Impossible<String, Error>;
	type SerializeTupleVariant = Impossible<String, Error>;
	type SerializeMap = Impossible<String, Error>;
	type SerializeStruct = Impossible<String, Error>;
	type SerializeStructVariant = Impossible<String, Error>;

	fn serialize_bool(self, value: bool) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_i8(self, value: i8) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_i16(self, value: i16) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_i32(self, value: i32) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_i64(self, value: i64) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_i128(self, value: i128) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_u8(self, value: u8) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_u16(self, value: u16) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_u32(self, value: u32) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_u64(self, value: u64) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_u128(self, value: u128) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_f32(self, _value: f32) -> Result<String> {
		Err(self.reject("float"))
	}

	fn serialize_f64(self, _value: f64) -> Result<String> {
		Err(self.reject("float"))
	}

	fn serialize_char(self, value: char) -> Result<String> {
		Ok(value.to_string())
	}

	fn serialize_str(self, value: &str) -> Result<String> {
		Ok(value.to_owned())
	}

	fn serialize_bytes(self, _value: &[u8]) -> Result<String> {
		Err(self.reject("bytes"))
	}

	fn serialize_none(self) -> Result<String> {
		Err(self.reject("`None`"))
	}

	fn serialize_some<T>(self, value: &T) -> Result<String>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<String> {
		Err(self.reject("unit"))
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
		Err(self.reject("unit struct"))
	}

	fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<String> {
		Ok(variant.to_owned())
	}

	fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_newtype_variant<T>(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _value: &T) -> Result<String>
	where
		T: ?Sized + Serialize,
	{
		Err(self.reject("enum variant"))
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<Impossible<String, Error>> {
		Err(self.reject("sequence"))
	}

	fn serialize_tuple(self, _len: usize) -> Result<Impossible<String, Error>> {
		Err(self.reject("tuple"))
	}

	fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Impossible<String, Error>> {
		Err(self.reject("tuple struct"))
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Impossible<String, Error>> {
		Err(self.reject("enum variant"))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Impossible<String, Error>> {
		Err(self.reject("mapping"))
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Impossible<String, Error>> {
		Err(self.reject("struct"))
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Impossible<String, Error>> {
		Err(self.reject("enum variant"))
	}
}

#[cfg(test)]
mod tests;
