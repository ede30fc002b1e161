use std::fmt;

use anyvalue::dynamic::DynamicValue;

/// Output truncation and formatting limits for decoded trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single mapping.
	pub max_fields_per_mapping: usize,
	/// Maximum number of Unicode scalar values printed for text.
	pub max_string_len: usize,
	/// Maximum number of elements printed for sequences.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_mapping: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree to stdout.
pub fn print_value(value: &DynamicValue, options: PrintOptions) {
	print!("{}", Rendered { value, options });
}

/// Render a value tree with kind labels, one scalar per line.
pub fn render_value(value: &DynamicValue, options: PrintOptions) -> String {
	Rendered { value, options }.to_string()
}

struct Rendered<'a> {
	value: &'a DynamicValue,
	options: PrintOptions,
}

impl fmt::Display for Rendered<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_value(f, self.value, 0, 0, self.options)
	}
}

fn write_value(out: &mut impl fmt::Write, value: &DynamicValue, indent: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	let pad = " ".repeat(indent);
	match value {
		DynamicValue::Integer(v) => writeln!(out, "{pad}{v} (integer)"),
		DynamicValue::FloatingPoint(v) => writeln!(out, "{pad}{v:?} (float)"),
		DynamicValue::Boolean(v) => writeln!(out, "{pad}{v} (boolean)"),
		DynamicValue::Text(v) => writeln!(out, "{pad}\"{}\" (text)", truncate(v, options.max_string_len)),
		DynamicValue::Sequence(items) => {
			if items.is_empty() {
				return writeln!(out, "{pad}[]");
			}
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}[... {} items]", items.len());
			}
			writeln!(out, "{pad}[")?;
			for item in items.iter().take(options.max_array_items) {
				write_value(out, item, indent + 2, depth + 1, options)?;
			}
			if items.len() > options.max_array_items {
				writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items)?;
			}
			writeln!(out, "{pad}]")
		}
		DynamicValue::Mapping(entries) => {
			if entries.is_empty() {
				return writeln!(out, "{pad}{{}}");
			}
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}{{ ... {} entries }}", entries.len());
			}
			writeln!(out, "{pad}{{")?;
			for (key, item) in entries.iter().take(options.max_fields_per_mapping) {
				write!(out, "{pad}  {key} = ")?;
				if item.kind().is_container() && !item.is_empty_container() {
					writeln!(out)?;
					write_value(out, item, indent + 4, depth + 1, options)?;
				} else {
					write_value(out, item, 0, depth + 1, options)?;
				}
			}
			if entries.len() > options.max_fields_per_mapping {
				writeln!(out, "{pad}  ... {} more entries", entries.len() - options.max_fields_per_mapping)?;
			}
			writeln!(out, "{pad}}}")
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
