use std::path::PathBuf;

use anyvalue::dynamic::{DynamicValue, Error, Result, ValuePath, to_json_string, to_json_string_pretty};

use crate::cmd::util::{DecodeArgs, decode_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Path expression such as `entries[0].name` or `$["odd key"]`.
	#[arg(long = "path")]
	pub expr: String,
	#[command(flatten)]
	pub decode: DecodeArgs,
	#[arg(long)]
	pub compact: bool,
}

/// Resolve a path expression and print the selected subtree as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		expr,
		decode,
		compact,
	} = args;

	let target = ValuePath::parse(&expr)?;
	let value = decode_input(&path, &decode.options())?;
	let selected = select(&value, &target)?;

	let rendered = if compact { to_json_string(selected)? } else { to_json_string_pretty(selected)? };
	println!("{rendered}");
	Ok(())
}

pub(crate) fn select<'a>(value: &'a DynamicValue, target: &ValuePath) -> Result<&'a DynamicValue> {
	value.lookup(target).ok_or_else(|| Error::PathNotFound { path: target.to_string() })
}

#[cfg(test)]
mod tests;
