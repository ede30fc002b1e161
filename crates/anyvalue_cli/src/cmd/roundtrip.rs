use std::path::PathBuf;

use anyvalue::dynamic::{Error, Result, ValuePath, from_json_str, to_json_string};

use crate::cmd::util::{DecodeArgs, decode_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode, encode, and decode again, failing when the two trees differ.
pub fn run(args: Args) -> Result<()> {
	let Args { path, decode } = args;
	let options = decode.options();

	let first = decode_input(&path, &options)?;
	let encoded = to_json_string(&first)?;
	let second = from_json_str(&encoded, &options)?;

	if first != second {
		tracing::debug!(%encoded, "re-decoded tree differs");
		return Err(Error::DataCorrupted {
			path: ValuePath::root(),
			reason: "re-decoded tree differs from the first decode".into(),
		});
	}

	println!("ok: {} ({} bytes encoded)", first.kind(), encoded.len());
	Ok(())
}
