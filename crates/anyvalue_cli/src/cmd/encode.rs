use std::path::PathBuf;

use anyvalue::dynamic::{Result, to_json_string, to_json_string_pretty};

use crate::cmd::util::{DecodeArgs, decode_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub decode: DecodeArgs,
	#[arg(long)]
	pub pretty: bool,
}

/// Decode a document and re-encode it as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { path, decode, pretty } = args;

	let value = decode_input(&path, &decode.options())?;
	let encoded = if pretty { to_json_string_pretty(&value)? } else { to_json_string(&value)? };
	println!("{encoded}");
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::cmd::test_support::run_anyvalue_stdin;

	#[test]
	fn encode_keeps_float_form_and_sorts_keys() {
		let output = run_anyvalue_stdin(&["encode", "-"], r#"{"b":2.0,"a":[1,"x"]}"#);
		assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
		assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), r#"{"a":[1,"x"],"b":2.0}"#);
	}
}
