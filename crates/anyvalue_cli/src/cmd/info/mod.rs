use std::collections::BTreeMap;
use std::path::PathBuf;

use anyvalue::dynamic::{DynamicValue, Result, ValueKind};

use crate::cmd::util::{DecodeArgs, decode_input, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub decode: DecodeArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print root kind, nesting depth, and per-kind node counts.
pub fn run(args: Args) -> Result<()> {
	let Args { path, decode, json } = args;

	let value = decode_input(&path, &decode.options())?;
	let stats = TreeStats::collect(&value);

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			root_kind: value.kind().name(),
			depth: stats.depth,
			nodes: stats.nodes,
			counts: stats.named_counts(),
		})?;
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("root_kind: {}", value.kind());
	println!("depth: {}", stats.depth);
	println!("nodes: {}", stats.nodes);
	println!("counts:");
	for kind in ValueKind::ALL {
		println!("  {}: {}", kind, stats.count(kind));
	}

	Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TreeStats {
	pub(crate) depth: usize,
	pub(crate) nodes: usize,
	counts: [usize; ValueKind::ALL.len()],
}

impl TreeStats {
	pub(crate) fn collect(value: &DynamicValue) -> Self {
		let mut stats = Self {
			depth: value.depth(),
			..Self::default()
		};
		let mut stack = vec![value];
		while let Some(node) = stack.pop() {
			stats.nodes += 1;
			stats.counts[kind_slot(node.kind())] += 1;
			match node {
				DynamicValue::Mapping(entries) => stack.extend(entries.values()),
				DynamicValue::Sequence(items) => stack.extend(items.iter()),
				_ => {}
			}
		}
		stats
	}

	pub(crate) fn count(&self, kind: ValueKind) -> usize {
		self.counts[kind_slot(kind)]
	}

	fn named_counts(&self) -> BTreeMap<&'static str, usize> {
		ValueKind::ALL.iter().map(|kind| (kind.name(), self.count(*kind))).collect()
	}
}

fn kind_slot(kind: ValueKind) -> usize {
	kind as usize
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	root_kind: &'static str,
	depth: usize,
	nodes: usize,
	counts: BTreeMap<&'static str, usize>,
}
