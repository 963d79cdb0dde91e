use std::fmt;

use crate::memory::{MemoryError, Result};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named struct field.
	Field(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed field path expression such as `header.items[2].x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// A leading `[index]` is accepted so array roots can be addressed.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || MemoryError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
				idx += 1;
			}

			if idx == start && !(start == 0 && bytes[0] == b'[') {
				return Err(invalid());
			}
			if idx > start {
				steps.push(PathStep::Field(input[start..idx].to_owned()));
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}

				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) if idx == 0 => write!(f, "{name}")?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
