use crate::memory::layout::align_up;
use crate::memory::{Endianness, MachineDescriptor, MemoryError, Result};

/// Bounded read head over an immutable capture buffer.
///
/// Every read checks the remaining length before touching a byte and
/// reports [`MemoryError::UnexpectedEof`] instead of reading out of bounds.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
	bytes: &'a [u8],
	pos: usize,
	machine: MachineDescriptor,
}

impl<'a> Decoder<'a> {
	/// Create a decoder at position 0.
	pub fn new(bytes: &'a [u8], machine: MachineDescriptor) -> Self {
		Self { bytes, pos: 0, machine }
	}

	/// Create a decoder at `offset`, which may equal the buffer length.
	pub fn at(bytes: &'a [u8], offset: usize, machine: MachineDescriptor) -> Result<Self> {
		if offset > bytes.len() {
			return Err(MemoryError::InvalidStartOffset { offset, len: bytes.len() });
		}
		Ok(Self { bytes, pos: offset, machine })
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Machine the buffer was captured from.
	pub fn machine(&self) -> &MachineDescriptor {
		&self.machine
	}

	/// Underlying buffer.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Move back to an offset previously returned by [`Decoder::pos`].
	pub(crate) fn rewind(&mut self, pos: usize) {
		debug_assert!(pos <= self.bytes.len());
		self.pos = pos.min(self.bytes.len());
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(MemoryError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Advance `n` bytes without interpreting them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let _ = self.read_exact(n)?;
		Ok(())
	}

	/// Advance to the next multiple of `n` (measured from the buffer start).
	pub fn align(&mut self, n: usize) -> Result<()> {
		let aligned = align_up(self.pos, n);
		self.skip(aligned - self.pos)
	}

	/// Read a `u8`.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read an `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_ne_bytes(self.read_array::<1>()?))
	}

	/// Read a `u16` in target byte order.
	pub fn read_u16(&mut self) -> Result<u16> {
		let buf = self.read_array::<2>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => u16::from_le_bytes(buf),
			Endianness::Big => u16::from_be_bytes(buf),
		})
	}

	/// Read an `i16` in target byte order.
	pub fn read_i16(&mut self) -> Result<i16> {
		let buf = self.read_array::<2>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => i16::from_le_bytes(buf),
			Endianness::Big => i16::from_be_bytes(buf),
		})
	}

	/// Read a `u32` in target byte order.
	pub fn read_u32(&mut self) -> Result<u32> {
		let buf = self.read_array::<4>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => u32::from_le_bytes(buf),
			Endianness::Big => u32::from_be_bytes(buf),
		})
	}

	/// Read an `i32` in target byte order.
	pub fn read_i32(&mut self) -> Result<i32> {
		let buf = self.read_array::<4>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => i32::from_le_bytes(buf),
			Endianness::Big => i32::from_be_bytes(buf),
		})
	}

	/// Read a `u64` in target byte order.
	pub fn read_u64(&mut self) -> Result<u64> {
		let buf = self.read_array::<8>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => u64::from_le_bytes(buf),
			Endianness::Big => u64::from_be_bytes(buf),
		})
	}

	/// Read an `i64` in target byte order.
	pub fn read_i64(&mut self) -> Result<i64> {
		let buf = self.read_array::<8>()?;
		Ok(match self.machine.byte_order() {
			Endianness::Little => i64::from_le_bytes(buf),
			Endianness::Big => i64::from_be_bytes(buf),
		})
	}

	/// Read an `f32` in target byte order.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read_u32()?))
	}

	/// Read an `f64` in target byte order.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_bits(self.read_u64()?))
	}

	/// Read one byte as a boolean; any nonzero byte is `true`.
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	/// Read an unsigned integer of `width` bytes and widen to `u64`.
	pub fn read_uint(&mut self, width: usize) -> Result<u64> {
		match width {
			1 => Ok(u64::from(self.read_u8()?)),
			2 => Ok(u64::from(self.read_u16()?)),
			4 => Ok(u64::from(self.read_u32()?)),
			8 => self.read_u64(),
			_ => Err(MemoryError::UnsupportedWidth { width }),
		}
	}

	/// Read a signed integer of `width` bytes and sign-extend to `i64`.
	pub fn read_int(&mut self, width: usize) -> Result<i64> {
		match width {
			1 => Ok(i64::from(self.read_i8()?)),
			2 => Ok(i64::from(self.read_i16()?)),
			4 => Ok(i64::from(self.read_i32()?)),
			8 => self.read_i64(),
			_ => Err(MemoryError::UnsupportedWidth { width }),
		}
	}

	/// Read a native-width signed integer.
	pub fn read_native_int(&mut self) -> Result<i64> {
		self.read_int(self.machine.native_int_width())
	}

	/// Read a native-width unsigned integer.
	pub fn read_native_uint(&mut self) -> Result<u64> {
		self.read_uint(self.machine.native_int_width())
	}

	/// Read a size-type value.
	pub fn read_size(&mut self) -> Result<u64> {
		self.read_uint(self.machine.native_size_width())
	}

	/// Read a one-byte character.
	pub fn read_char(&mut self) -> Result<u8> {
		self.read_u8()
	}

	/// Read a pointer-width unsigned integer.
	pub fn read_ptr(&mut self) -> Result<u64> {
		self.read_uint(self.machine.pointer_width())
	}

	/// Read a zero-terminated byte string without the terminator.
	pub fn read_cstring_bytes(&mut self) -> Result<&'a [u8]> {
		let start = self.pos;
		let rem = &self.bytes[start..];
		let Some(rel_end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(MemoryError::UnterminatedString {
				at: start,
				rem: rem.len(),
			});
		};

		self.pos = start + rel_end + 1;
		Ok(&rem[..rel_end])
	}

	/// Read a zero-terminated string, replacing invalid UTF-8.
	pub fn read_string(&mut self) -> Result<String> {
		let bytes = self.read_cstring_bytes()?;
		Ok(String::from_utf8_lossy(bytes).into_owned())
	}
}

#[cfg(test)]
mod tests;
