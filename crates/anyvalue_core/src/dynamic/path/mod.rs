use std::fmt;

use crate::dynamic::{Error, Result};

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a mapping entry by key.
	Key(String),
	/// Select a sequence element by zero-based index.
	Index(usize),
}

/// Location of a node relative to the root of a decode, wrap, or lookup.
///
/// Renders as `$` for the root, `.name` for identifier-like keys, `["odd key"]`
/// for other keys, and `[n]` for indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
	/// Ordered sequence of path steps, outermost first.
	pub steps: Vec<PathStep>,
}

impl ValuePath {
	/// Empty path addressing the root node.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether this path addresses the root node.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Path of a mapping child under this path.
	pub fn child_key(&self, key: &str) -> Self {
		let mut out = self.clone();
		out.steps.push(PathStep::Key(key.to_owned()));
		out
	}

	/// Path of a sequence child under this path.
	pub fn child_index(&self, index: usize) -> Self {
		let mut out = self.clone();
		out.steps.push(PathStep::Index(index));
		out
	}

	/// Parse dotted key syntax with `[index]` and `["quoted key"]` selectors.
	///
	/// A leading `$` is optional; `$` alone addresses the root.
	pub fn parse(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Err(invalid(input));
		}

		let anchored = input.starts_with('$');
		let body = if anchored { &input[1..] } else { input };
		let bytes = body.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			match bytes[idx] {
				b'[' => {
					idx += 1;
					if idx < bytes.len() && bytes[idx] == b'"' {
						let (key, next) = parse_quoted(body, idx).ok_or_else(|| invalid(input))?;
						steps.push(PathStep::Key(key));
						idx = next;
					} else {
						let n_start = idx;
						while idx < bytes.len() && bytes[idx].is_ascii_digit() {
							idx += 1;
						}
						if idx == n_start {
							return Err(invalid(input));
						}
						let number = body[n_start..idx].parse::<usize>().map_err(|_| invalid(input))?;
						steps.push(PathStep::Index(number));
					}

					if idx >= bytes.len() || bytes[idx] != b']' {
						return Err(invalid(input));
					}
					idx += 1;
				}
				b'.' => {
					idx += 1;
					let (key, next) = parse_ident(body, idx).ok_or_else(|| invalid(input))?;
					steps.push(PathStep::Key(key.to_owned()));
					idx = next;
				}
				_ if idx == 0 && !anchored => {
					let (key, next) = parse_ident(body, idx).ok_or_else(|| invalid(input))?;
					steps.push(PathStep::Key(key.to_owned()));
					idx = next;
				}
				_ => return Err(invalid(input)),
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for ValuePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
				PathStep::Key(key) => {
					f.write_str("[\"")?;
					for ch in key.chars() {
						if ch == '"' || ch == '\\' {
							f.write_str("\\")?;
						}
						write!(f, "{ch}")?;
					}
					f.write_str("\"]")?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

fn invalid(input: &str) -> Error {
	Error::InvalidPath { path: input.to_owned() }
}

fn is_ident_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || !byte.is_ascii()
}

fn is_plain_key(key: &str) -> bool {
	!key.is_empty() && key.bytes().all(is_ident_byte)
}

fn parse_ident(body: &str, start: usize) -> Option<(&str, usize)> {
	let bytes = body.as_bytes();
	let mut idx = start;
	while idx < bytes.len() && is_ident_byte(bytes[idx]) {
		idx += 1;
	}
	if idx == start {
		return None;
	}
	Some((&body[start..idx], idx))
}

/// Parse a `"..."` key starting at the opening quote; returns the key and the index after the closing quote.
fn parse_quoted(body: &str, start: usize) -> Option<(String, usize)> {
	let bytes = body.as_bytes();
	let mut idx = start + 1;
	let mut out = Vec::new();
	while idx < bytes.len() {
		match bytes[idx] {
			b'"' => {
				let key = String::from_utf8(out).ok()?;
				return Some((key, idx + 1));
			}
			b'\\' => {
				idx += 1;
				out.push(*bytes.get(idx)?);
			}
			byte => out.push(byte),
		}
		idx += 1;
	}
	None
}
