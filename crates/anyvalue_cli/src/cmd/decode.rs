use std::path::PathBuf;

use anyvalue::dynamic::{DynamicValue, Result};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{DecodeArgs, decode_input, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub decode: DecodeArgs,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-items", default_value_t = 16)]
	pub max_items: usize,
	#[arg(long = "print-depth", default_value_t = 6)]
	pub print_depth: u32,
}

/// Decode a document and print its typed tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		decode,
		json,
		max_items,
		print_depth,
	} = args;

	let value = decode_input(&path, &decode.options())?;

	if json {
		emit_json(&DecodeJson {
			kind: value.kind().name(),
			value: &value,
		})?;
		return Ok(());
	}

	let options = PrintOptions {
		max_array_items: max_items,
		max_print_depth: print_depth,
		..PrintOptions::default()
	};
	print_value(&value, options);
	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson<'a> {
	kind: &'static str,
	value: &'a DynamicValue,
}
