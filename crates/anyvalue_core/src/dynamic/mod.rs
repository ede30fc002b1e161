mod decode;
mod encode;
mod error;
mod json;
mod path;
mod value;
mod wrap;

/// Option-driven decode entry points.
pub use decode::{DecodeOptions, DynamicValueSeed, decode_from};
/// Wrap-then-encode helper for native values.
pub use encode::encode_native;
/// Error and result aliases.
pub use error::{Error, Result};
/// JSON convenience entry points.
pub use json::{from_json_reader, from_json_slice, from_json_str, native_to_json_string, to_json_string, to_json_string_pretty};
/// Node location types.
pub use path::{PathStep, ValuePath};
/// Dynamic value types.
pub use value::{DynamicValue, Mapping, ValueKind};
/// Native value wrapping.
pub use wrap::to_dynamic;
