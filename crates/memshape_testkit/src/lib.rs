//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Test-side writer mirroring target memory layout.
///
/// This is the symmetric write path used to build capture buffers in tests:
/// every write first pads to its own alignment, as the decoder expects.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
	bytes: Vec<u8>,
	big_endian: bool,
}

impl Encoder {
	/// Little-endian encoder.
	pub fn little() -> Self {
		Self::default()
	}

	/// Big-endian encoder.
	pub fn big() -> Self {
		Self {
			bytes: Vec::new(),
			big_endian: true,
		}
	}

	/// Current length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Finish and return the buffer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Pad with zero bytes to a multiple of `n`.
	pub fn align(&mut self, n: usize) -> &mut Self {
		if n > 1 {
			while self.bytes.len() % n != 0 {
				self.bytes.push(0);
			}
		}
		self
	}

	/// Append `n` filler bytes.
	pub fn pad(&mut self, n: usize, fill: u8) -> &mut Self {
		self.bytes.extend(std::iter::repeat_n(fill, n));
		self
	}

	/// Append raw bytes without alignment.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Write the low `width` bytes of `value`, aligned to `width`.
	pub fn uint(&mut self, width: usize, value: u64) -> &mut Self {
		assert!(matches!(width, 1 | 2 | 4 | 8), "unsupported width {width}");
		self.align(width);
		let le = value.to_le_bytes();
		if self.big_endian {
			self.bytes.extend(le[..width].iter().rev());
		} else {
			self.bytes.extend_from_slice(&le[..width]);
		}
		self
	}

	/// Write a two's complement signed integer of `width` bytes.
	pub fn int(&mut self, width: usize, value: i64) -> &mut Self {
		self.uint(width, value as u64)
	}

	/// Write a `u8`.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.uint(1, u64::from(value))
	}

	/// Write a `u16`.
	pub fn u16(&mut self, value: u16) -> &mut Self {
		self.uint(2, u64::from(value))
	}

	/// Write a `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.uint(4, u64::from(value))
	}

	/// Write a `u64`.
	pub fn u64(&mut self, value: u64) -> &mut Self {
		self.uint(8, value)
	}

	/// Write an `i8`.
	pub fn i8(&mut self, value: i8) -> &mut Self {
		self.int(1, i64::from(value))
	}

	/// Write an `i16`.
	pub fn i16(&mut self, value: i16) -> &mut Self {
		self.int(2, i64::from(value))
	}

	/// Write an `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.int(4, i64::from(value))
	}

	/// Write an `i64`.
	pub fn i64(&mut self, value: i64) -> &mut Self {
		self.int(8, value)
	}

	/// Write an `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.uint(4, u64::from(value.to_bits()))
	}

	/// Write an `f64`.
	pub fn f64(&mut self, value: f64) -> &mut Self {
		self.uint(8, value.to_bits())
	}

	/// Write a boolean byte.
	pub fn bool(&mut self, value: bool) -> &mut Self {
		self.u8(u8::from(value))
	}

	/// Write a NUL-terminated string.
	pub fn cstr(&mut self, value: &str) -> &mut Self {
		self.bytes.extend_from_slice(value.as_bytes());
		self.bytes.push(0);
		self
	}
}
