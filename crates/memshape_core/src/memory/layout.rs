use crate::memory::{FieldPath, MachineDescriptor, MemoryError, PathStep, Result, StructShape, ValueShape};

/// Static byte size and alignment of a shape on one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	/// Size in bytes, including tail padding.
	pub size: usize,
	/// Required alignment in bytes (at least 1).
	pub align: usize,
}

/// Placement of one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOffset {
	/// Field identifier.
	pub name: Box<str>,
	/// Byte offset from the start of the struct.
	pub offset: usize,
	/// Field size in bytes.
	pub size: usize,
	/// Field alignment in bytes.
	pub align: usize,
}

/// Struct layout together with its field placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
	/// Whole-struct size and alignment.
	pub layout: Layout,
	/// Per-field placement in declaration order.
	pub fields: Vec<FieldOffset>,
}

impl StructLayout {
	/// Padding bytes between the last field and the end of the struct.
	pub fn tail_padding(&self) -> usize {
		let end = self.fields.last().map(|field| field.offset.saturating_add(field.size)).unwrap_or(0);
		self.layout.size.saturating_sub(end)
	}
}

/// Round `offset` up to the next multiple of `align`.
pub fn align_up(offset: usize, align: usize) -> usize {
	if align <= 1 {
		return offset;
	}
	offset.checked_next_multiple_of(align).unwrap_or(usize::MAX)
}

/// Fixed width of a scalar shape on `machine`, or `None` for compound and variable-length shapes.
pub fn scalar_width(shape: &ValueShape, machine: &MachineDescriptor) -> Option<usize> {
	let width = match shape {
		ValueShape::Bool | ValueShape::Int8 | ValueShape::Uint8 | ValueShape::Char => 1,
		ValueShape::Int16 | ValueShape::Uint16 => 2,
		ValueShape::Int32 | ValueShape::Uint32 | ValueShape::Float32 => 4,
		ValueShape::Int64 | ValueShape::Uint64 | ValueShape::Float64 => 8,
		ValueShape::NativeInt | ValueShape::NativeUint => machine.native_int_width(),
		ValueShape::NativeSize => machine.native_size_width(),
		ValueShape::Pointer { .. } => machine.pointer_width(),
		ValueShape::String | ValueShape::Array { .. } | ValueShape::Struct(_) => return None,
	};
	Some(width)
}

/// Compute size and alignment of `shape` on `machine`.
pub fn layout_of(shape: &ValueShape, machine: &MachineDescriptor) -> Layout {
	if let Some(width) = scalar_width(shape, machine) {
		return Layout { size: width, align: width };
	}

	match shape {
		// Consumed length is only known while decoding.
		ValueShape::String => Layout { size: 0, align: 1 },
		ValueShape::Array { element, length } => {
			let inner = layout_of(element, machine);
			Layout {
				size: inner.size.checked_mul(*length).unwrap_or_else(|| saturated_size(inner.align)),
				align: inner.align,
			}
		}
		ValueShape::Struct(item) => struct_layout(item, machine).layout,
		_ => Layout { size: 0, align: 1 },
	}
}

/// Size in bytes of `shape` on `machine`.
pub fn size_of(shape: &ValueShape, machine: &MachineDescriptor) -> usize {
	layout_of(shape, machine).size
}

/// Alignment in bytes of `shape` on `machine`.
pub fn align_of(shape: &ValueShape, machine: &MachineDescriptor) -> usize {
	layout_of(shape, machine).align
}

/// Place every field of `item` following C layout rules.
pub fn struct_layout(item: &StructShape, machine: &MachineDescriptor) -> StructLayout {
	let mut offset = 0_usize;
	let mut align = 1_usize;
	let mut fields = Vec::with_capacity(item.fields.len());

	for field in &item.fields {
		let inner = layout_of(&field.shape, machine);
		offset = align_up(offset, inner.align);
		fields.push(FieldOffset {
			name: field.name.clone(),
			offset,
			size: inner.size,
			align: inner.align,
		});
		offset = offset.saturating_add(inner.size);
		align = align.max(inner.align);
	}

	StructLayout {
		layout: Layout {
			size: offset.checked_next_multiple_of(align).unwrap_or_else(|| saturated_size(align)),
			align,
		},
		fields,
	}
}

/// Largest size that is still a multiple of `align`, used when a size overflows.
///
/// No buffer can hold it, so decoding such a shape always fails the bounds check.
fn saturated_size(align: usize) -> usize {
	usize::MAX - usize::MAX % align.max(1)
}

/// Resolve `path` inside `shape` to a byte offset and the shape found there.
///
/// Paths cannot cross pointers: the pointee lives in another buffer.
pub fn offset_of<'s>(shape: &'s ValueShape, path: &FieldPath, machine: &MachineDescriptor) -> Result<(usize, &'s ValueShape)> {
	let not_found = || MemoryError::FieldNotFound { path: path.to_string() };

	let mut current = shape;
	let mut offset = 0_usize;
	for step in &path.steps {
		match (step, current) {
			(PathStep::Field(name), ValueShape::Struct(item)) => {
				let (idx, field) = item.field(name).ok_or_else(not_found)?;
				let placed = struct_layout(item, machine);
				offset = offset.saturating_add(placed.fields[idx].offset);
				current = &field.shape;
			}
			(PathStep::Index(idx), ValueShape::Array { element, length }) => {
				if idx >= length {
					return Err(not_found());
				}
				offset = offset.saturating_add(size_of(element, machine).saturating_mul(*idx));
				current = element;
			}
			_ => return Err(not_found()),
		}
	}

	Ok((offset, current))
}

#[cfg(test)]
mod tests;
