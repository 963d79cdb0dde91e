use crate::memory::{MemoryError, Result};

/// Byte order of the target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Least significant byte first.
	Little,
	/// Most significant byte first.
	Big,
}

impl Endianness {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}

	/// Parse a `little`/`big` label (also accepts `le`/`be`).
	pub fn parse(label: &str) -> Option<Self> {
		match label {
			"little" | "le" => Some(Self::Little),
			"big" | "be" => Some(Self::Big),
			_ => None,
		}
	}
}

/// Architecture facts of the process that produced a capture.
///
/// Every width is a power of two between 1 and 8 bytes; [`MachineDescriptor::new`]
/// rejects anything else, so readers can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineDescriptor {
	pointer_width: usize,
	native_int_width: usize,
	native_size_width: usize,
	byte_order: Endianness,
}

/// Named ABI presets accepted by [`MachineDescriptor::preset`].
pub const PRESET_NAMES: &[&str] = &["x86_64", "aarch64", "x86", "armv7", "ppc32", "ppc64", "wasm32"];

impl MachineDescriptor {
	/// Build a descriptor, validating every width.
	pub fn new(pointer_width: usize, native_int_width: usize, native_size_width: usize, byte_order: Endianness) -> Result<Self> {
		check_width("pointer_width", pointer_width)?;
		check_width("native_int_width", native_int_width)?;
		check_width("native_size_width", native_size_width)?;
		Ok(Self {
			pointer_width,
			native_int_width,
			native_size_width,
			byte_order,
		})
	}

	/// 64-bit little-endian target (x86-64, AArch64).
	pub const fn lp64_le() -> Self {
		Self::fixed(8, Endianness::Little)
	}

	/// 32-bit little-endian target (x86, ARMv7, wasm32).
	pub const fn ilp32_le() -> Self {
		Self::fixed(4, Endianness::Little)
	}

	const fn fixed(width: usize, byte_order: Endianness) -> Self {
		Self {
			pointer_width: width,
			native_int_width: width,
			native_size_width: width,
			byte_order,
		}
	}

	/// Look up a named preset from [`PRESET_NAMES`].
	pub fn preset(name: &str) -> Result<Self> {
		match name {
			"x86_64" | "aarch64" => Ok(Self::lp64_le()),
			"x86" | "armv7" | "wasm32" => Ok(Self::ilp32_le()),
			"ppc32" => Ok(Self::fixed(4, Endianness::Big)),
			"ppc64" => Ok(Self::fixed(8, Endianness::Big)),
			_ => Err(MemoryError::InvalidMachine {
				reason: format!("unknown preset {name:?} (known: {})", PRESET_NAMES.join(", ")),
			}),
		}
	}

	/// Return a copy with a different pointer width.
	pub fn with_pointer_width(self, width: usize) -> Result<Self> {
		Self::new(width, self.native_int_width, self.native_size_width, self.byte_order)
	}

	/// Return a copy with a different native integer width.
	pub fn with_native_int_width(self, width: usize) -> Result<Self> {
		Self::new(self.pointer_width, width, self.native_size_width, self.byte_order)
	}

	/// Return a copy with a different size-type width.
	pub fn with_native_size_width(self, width: usize) -> Result<Self> {
		Self::new(self.pointer_width, self.native_int_width, width, self.byte_order)
	}

	/// Return a copy with a different byte order.
	pub fn with_byte_order(self, byte_order: Endianness) -> Self {
		Self { byte_order, ..self }
	}

	/// Width of a pointer in bytes.
	pub fn pointer_width(&self) -> usize {
		self.pointer_width
	}

	/// Width of the native signed/unsigned integer in bytes.
	pub fn native_int_width(&self) -> usize {
		self.native_int_width
	}

	/// Width of the size type in bytes; not assumed to match the pointer width.
	pub fn native_size_width(&self) -> usize {
		self.native_size_width
	}

	/// Byte order for all multi-byte reads.
	pub fn byte_order(&self) -> Endianness {
		self.byte_order
	}
}

impl Default for MachineDescriptor {
	fn default() -> Self {
		Self::lp64_le()
	}
}

fn check_width(kind: &str, width: usize) -> Result<()> {
	if matches!(width, 1 | 2 | 4 | 8) {
		return Ok(());
	}
	Err(MemoryError::InvalidMachine {
		reason: format!("{kind} must be 1, 2, 4 or 8 bytes, got {width}"),
	})
}
