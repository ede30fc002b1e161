use std::fmt::Display;

use thiserror::Error;

use crate::dynamic::ValuePath;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding, wrapping, encoding, and querying dynamic values.
#[derive(Debug, Error)]
pub enum Error {
	/// Input node matched no container shape or no scalar interpretation.
	#[error("data corrupted at {path}: {reason}")]
	DataCorrupted {
		/// Location of the offending node.
		path: ValuePath,
		/// Human-readable cause.
		reason: String,
	},
	/// Native payload kind is outside the supported value kinds.
	#[error("invalid value at {path}: {reason}")]
	InvalidValue {
		/// Location of the offending value.
		path: ValuePath,
		/// Description naming the offending value.
		reason: String,
	},
	/// Container nesting exceeded the configured decode limit.
	#[error("nesting depth exceeded at {path} (max={max_depth})")]
	DepthExceeded {
		/// Location of the container that crossed the limit.
		path: ValuePath,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// The structured-format backend rejected the input or output.
	#[error("format: {0}")]
	Format(String),
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Path expression syntax is invalid.
	#[error("invalid value path: {path}")]
	InvalidPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Path expression did not resolve against the value tree.
	#[error("no value at path {path}")]
	PathNotFound {
		/// Rendered path that failed to resolve.
		path: String,
	},
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Format(err.to_string())
	}
}

impl serde::ser::Error for Error {
	fn custom<T: Display>(msg: T) -> Self {
		Self::Format(msg.to_string())
	}
}

impl serde::de::Error for Error {
	fn custom<T: Display>(msg: T) -> Self {
		Self::Format(msg.to_string())
	}
}
