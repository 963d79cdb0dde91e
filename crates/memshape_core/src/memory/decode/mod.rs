use std::sync::atomic::{AtomicBool, Ordering};

use crate::memory::layout::{align_of, scalar_width, size_of, struct_layout};
use crate::memory::value::{FieldValue, StructValue, Value};
use crate::memory::{Decoder, FromValue, MachineDescriptor, MemoryError, PoolRegistry, Result, Shaped, StructShape, ValueShape};

/// Runtime limits and behavior switches for shape-driven decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum shape nesting depth.
	pub max_depth: u32,
	/// Maximum element count of one instance run, and of one array whose
	/// elements have no static size. Other arrays are bounded by the buffer.
	pub max_array_elems: usize,
	/// Error when struct fields consume more than the struct's static size.
	pub strict_layout: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 256,
			max_array_elems: 1 << 20,
			strict_layout: false,
		}
	}
}

/// Decode one value of `shape` at the decoder's position.
///
/// On failure the decoder is moved back to where it started, so callers can
/// report the error and resume elsewhere without a half-advanced cursor.
pub fn decode_value(decoder: &mut Decoder<'_>, shape: &ValueShape, pools: &PoolRegistry, opt: &DecodeOptions) -> Result<Value> {
	let start = decoder.pos();
	tracing::trace!(kind = shape.kind_name(), at = start, "decode value");

	match decode_impl(decoder, shape, pools, opt, 0) {
		Ok(value) => Ok(value),
		Err(err) => {
			decoder.rewind(start);
			Err(err)
		}
	}
}

/// Decode one value of `shape` at `offset` and return it with the offset just past it.
pub fn decode_at(
	bytes: &[u8],
	offset: usize,
	shape: &ValueShape,
	machine: MachineDescriptor,
	pools: &PoolRegistry,
	opt: &DecodeOptions,
) -> Result<(Value, usize)> {
	let mut decoder = Decoder::at(bytes, offset, machine)?;
	let value = decode_value(&mut decoder, shape, pools, opt)?;
	Ok((value, decoder.pos()))
}

/// Decode `count` consecutive values of `shape`.
///
/// `cancel` is polled before each instance, never inside one.
pub fn decode_instances(
	decoder: &mut Decoder<'_>,
	shape: &ValueShape,
	count: usize,
	pools: &PoolRegistry,
	opt: &DecodeOptions,
	cancel: Option<&AtomicBool>,
) -> Result<Vec<Value>> {
	if count > opt.max_array_elems {
		return Err(MemoryError::ArrayTooLarge {
			count,
			max: opt.max_array_elems,
		});
	}

	tracing::debug!(kind = shape.kind_name(), count, at = decoder.pos(), "decode instances");

	let mut values = Vec::with_capacity(count.min(decoder.remaining().max(1)));
	for completed in 0..count {
		if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
			tracing::debug!(completed, "decode cancelled");
			return Err(MemoryError::Cancelled { completed });
		}
		values.push(decode_value(decoder, shape, pools, opt)?);
	}
	Ok(values)
}

/// Decode `shape` and bind it into `dest`; `dest` is untouched on failure.
pub fn decode_into<T: FromValue>(decoder: &mut Decoder<'_>, shape: &ValueShape, pools: &PoolRegistry, opt: &DecodeOptions, dest: &mut T) -> Result<()> {
	let start = decoder.pos();
	let value = decode_value(decoder, shape, pools, opt)?;
	match T::from_value(value) {
		Ok(bound) => {
			*dest = bound;
			Ok(())
		}
		Err(err) => {
			decoder.rewind(start);
			Err(err)
		}
	}
}

/// Decode a `T` using the shape `T` declares for itself.
pub fn decode_typed<T: Shaped + FromValue>(decoder: &mut Decoder<'_>, pools: &PoolRegistry, opt: &DecodeOptions) -> Result<T> {
	let shape = T::shape();
	let start = decoder.pos();
	let value = decode_value(decoder, &shape, pools, opt)?;
	T::from_value(value).inspect_err(|_| decoder.rewind(start))
}

fn decode_impl(decoder: &mut Decoder<'_>, shape: &ValueShape, pools: &PoolRegistry, opt: &DecodeOptions, depth: u32) -> Result<Value> {
	if depth >= opt.max_depth {
		return Err(MemoryError::DepthExceeded { max_depth: opt.max_depth });
	}

	let machine = *decoder.machine();
	if let Some(width) = scalar_width(shape, &machine) {
		decoder.align(width)?;
	}

	let value = match shape {
		ValueShape::Bool => Value::Bool(decoder.read_bool()?),
		ValueShape::Int8 => Value::I64(i64::from(decoder.read_i8()?)),
		ValueShape::Int16 => Value::I64(i64::from(decoder.read_i16()?)),
		ValueShape::Int32 => Value::I64(i64::from(decoder.read_i32()?)),
		ValueShape::Int64 => Value::I64(decoder.read_i64()?),
		ValueShape::Uint8 => Value::U64(u64::from(decoder.read_u8()?)),
		ValueShape::Uint16 => Value::U64(u64::from(decoder.read_u16()?)),
		ValueShape::Uint32 => Value::U64(u64::from(decoder.read_u32()?)),
		ValueShape::Uint64 => Value::U64(decoder.read_u64()?),
		ValueShape::Float32 => Value::F32(decoder.read_f32()?),
		ValueShape::Float64 => Value::F64(decoder.read_f64()?),
		ValueShape::String => Value::String(decoder.read_string()?.into_boxed_str()),
		ValueShape::NativeInt => Value::I64(decoder.read_native_int()?),
		ValueShape::NativeUint => Value::U64(decoder.read_native_uint()?),
		ValueShape::NativeSize => Value::U64(decoder.read_size()?),
		ValueShape::Char => Value::U64(u64::from(decoder.read_char()?)),
		ValueShape::Pointer { pool, .. } => {
			let raw = decoder.read_ptr()?;
			Value::Ptr(pools.tag(*pool, raw)?)
		}
		ValueShape::Array { element, length } => decode_array(decoder, shape, element, *length, pools, opt, depth)?,
		ValueShape::Struct(item) => Value::Struct(decode_struct(decoder, item, pools, opt, depth)?),
	};

	Ok(value)
}

fn decode_array(
	decoder: &mut Decoder<'_>,
	shape: &ValueShape,
	element: &ValueShape,
	length: usize,
	pools: &PoolRegistry,
	opt: &DecodeOptions,
	depth: u32,
) -> Result<Value> {
	let machine = *decoder.machine();
	decoder.align(align_of(element, &machine))?;
	ensure_available(decoder, size_of(shape, &machine))?;

	// Zero-size elements are not bounded by the buffer, only by the limit.
	if size_of(element, &machine) == 0 && length > opt.max_array_elems {
		return Err(MemoryError::ArrayTooLarge {
			count: length,
			max: opt.max_array_elems,
		});
	}

	let mut out = Vec::with_capacity(length.min(decoder.remaining().max(1)));
	for _ in 0..length {
		out.push(decode_impl(decoder, element, pools, opt, depth + 1)?);
	}
	Ok(Value::Array(out))
}

fn decode_struct(decoder: &mut Decoder<'_>, item: &StructShape, pools: &PoolRegistry, opt: &DecodeOptions, depth: u32) -> Result<StructValue> {
	let layout = struct_layout(item, decoder.machine()).layout;
	decoder.align(layout.align)?;
	ensure_available(decoder, layout.size)?;

	let start = decoder.pos();
	let mut fields = Vec::with_capacity(item.fields.len());
	for field in &item.fields {
		let value = decode_impl(decoder, &field.shape, pools, opt, depth + 1)?;
		fields.push(FieldValue {
			name: field.name.clone(),
			value,
		});
	}

	let consumed = decoder.pos() - start;
	if consumed <= layout.size {
		decoder.skip(layout.size - consumed)?;
	} else if opt.strict_layout {
		return Err(MemoryError::LayoutMismatch {
			type_name: item.name.to_string(),
			consumed,
			size: layout.size,
		});
	} else {
		tracing::debug!(type_name = %item.name, consumed, size = layout.size, "struct overran its static size");
	}

	Ok(StructValue {
		type_name: item.name.clone(),
		fields,
	})
}

/// Fail before allocating when the static size cannot fit in the remaining bytes.
fn ensure_available(decoder: &Decoder<'_>, need: usize) -> Result<()> {
	if need > decoder.remaining() {
		return Err(MemoryError::UnexpectedEof {
			at: decoder.pos(),
			need,
			rem: decoder.remaining(),
		});
	}
	Ok(())
}
