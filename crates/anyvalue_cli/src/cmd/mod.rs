/// Decode and print command.
pub mod decode;
/// Decode then re-encode command.
pub mod encode;
/// Path lookup command.
pub mod get;
/// Shape summary command.
pub mod info;
/// Typed tree printer.
pub mod print;
/// Decode/encode/decode equality check command.
pub mod roundtrip;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
