use std::io::Read;
use std::path::Path;

use anyvalue::dynamic::{DecodeOptions, DynamicValue, Result, from_json_reader, from_json_slice};

/// Decode switches shared by every command that reads a document.
#[derive(clap::Args, Debug, Clone)]
pub struct DecodeArgs {
	/// Maximum container nesting depth.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Treat floats without a fractional part as integers.
	#[arg(long = "integral-floats")]
	pub integral_floats: bool,
	/// Probe string scalars as integer, float, and boolean first.
	#[arg(long = "coerce-text")]
	pub coerce_text: bool,
}

impl DecodeArgs {
	/// Build decode options from command-line switches.
	pub(crate) fn options(&self) -> DecodeOptions {
		let mut options = DecodeOptions::default();
		if let Some(max_depth) = self.max_depth {
			options.max_depth = max_depth;
		}
		options.integral_floats_as_integers = self.integral_floats;
		options.coerce_text_scalars = self.coerce_text;
		options
	}
}

/// Decode a JSON document from a file path, or stdin when the path is `-`.
pub(crate) fn decode_input(path: &Path, options: &DecodeOptions) -> Result<DynamicValue> {
	tracing::debug!(path = %path.display(), max_depth = options.max_depth, "decoding input");
	if path.as_os_str() == "-" {
		let mut bytes = Vec::new();
		std::io::stdin().lock().read_to_end(&mut bytes)?;
		return from_json_slice(&bytes, options);
	}
	let file = std::fs::File::open(path)?;
	from_json_reader(std::io::BufReader::new(file), options)
}

/// Print a serializable payload as indented JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let rendered = serde_json::to_string_pretty(payload)?;
	println!("{rendered}");
	Ok(())
}
