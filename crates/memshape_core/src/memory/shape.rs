use crate::memory::PoolId;

/// Structural description of a value laid out in target memory.
///
/// Trees are built once per known target type and reused across decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
	/// One byte, nonzero is `true`.
	Bool,
	/// Signed 8-bit integer.
	Int8,
	/// Signed 16-bit integer.
	Int16,
	/// Signed 32-bit integer.
	Int32,
	/// Signed 64-bit integer.
	Int64,
	/// Unsigned 8-bit integer.
	Uint8,
	/// Unsigned 16-bit integer.
	Uint16,
	/// Unsigned 32-bit integer.
	Uint32,
	/// Unsigned 64-bit integer.
	Uint64,
	/// IEEE-754 single precision float.
	Float32,
	/// IEEE-754 double precision float.
	Float64,
	/// Variable-length NUL-terminated string stored inline.
	String,
	/// Signed integer of the target's native integer width.
	NativeInt,
	/// Unsigned integer of the target's native integer width.
	NativeUint,
	/// Unsigned integer of the target's size-type width.
	NativeSize,
	/// Single byte character.
	Char,
	/// Fixed-length inline array.
	Array {
		/// Element shape.
		element: Box<ValueShape>,
		/// Element count.
		length: usize,
	},
	/// Struct with fields in declaration order.
	Struct(StructShape),
	/// Pointer into a pool; decoded as an address, never followed.
	Pointer {
		/// Pool the pointed-to memory lives in.
		pool: PoolId,
		/// Shape of the pointed-to value.
		pointee: Box<ValueShape>,
	},
}

/// Struct declaration: a display name and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructShape {
	/// Struct type name, for display.
	pub name: Box<str>,
	/// Fields in target declaration order.
	pub fields: Vec<Field>,
}

/// Named struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	/// Field identifier.
	pub name: Box<str>,
	/// Field shape.
	pub shape: ValueShape,
}

impl Field {
	/// Build a field from a name and shape.
	pub fn new(name: impl Into<Box<str>>, shape: ValueShape) -> Self {
		Self { name: name.into(), shape }
	}
}

impl StructShape {
	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<(usize, &Field)> {
		self.fields.iter().enumerate().find(|(_, field)| field.name.as_ref() == name)
	}
}

impl ValueShape {
	/// Inline array of `length` elements.
	pub fn array(element: ValueShape, length: usize) -> Self {
		Self::Array {
			element: Box::new(element),
			length,
		}
	}

	/// Struct from `(name, shape)` pairs in declaration order.
	pub fn structure<N, I>(name: impl Into<Box<str>>, fields: I) -> Self
	where
		N: Into<Box<str>>,
		I: IntoIterator<Item = (N, ValueShape)>,
	{
		Self::Struct(StructShape {
			name: name.into(),
			fields: fields.into_iter().map(|(name, shape)| Field::new(name, shape)).collect(),
		})
	}

	/// Pointer into the application pool.
	pub fn pointer(pointee: ValueShape) -> Self {
		Self::pointer_in(PoolId::APPLICATION, pointee)
	}

	/// Pointer into an explicit pool.
	pub fn pointer_in(pool: PoolId, pointee: ValueShape) -> Self {
		Self::Pointer {
			pool,
			pointee: Box::new(pointee),
		}
	}

	/// Stable label for the shape kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Int8 => "i8",
			Self::Int16 => "i16",
			Self::Int32 => "i32",
			Self::Int64 => "i64",
			Self::Uint8 => "u8",
			Self::Uint16 => "u16",
			Self::Uint32 => "u32",
			Self::Uint64 => "u64",
			Self::Float32 => "f32",
			Self::Float64 => "f64",
			Self::String => "string",
			Self::NativeInt => "int",
			Self::NativeUint => "uint",
			Self::NativeSize => "size",
			Self::Char => "char",
			Self::Array { .. } => "array",
			Self::Struct(_) => "struct",
			Self::Pointer { .. } => "pointer",
		}
	}

	/// Parse a primitive kind label produced by [`ValueShape::kind_name`].
	pub fn primitive_from_name(name: &str) -> Option<Self> {
		let shape = match name {
			"bool" => Self::Bool,
			"i8" => Self::Int8,
			"i16" => Self::Int16,
			"i32" => Self::Int32,
			"i64" => Self::Int64,
			"u8" => Self::Uint8,
			"u16" => Self::Uint16,
			"u32" => Self::Uint32,
			"u64" => Self::Uint64,
			"f32" => Self::Float32,
			"f64" => Self::Float64,
			"string" => Self::String,
			"int" => Self::NativeInt,
			"uint" => Self::NativeUint,
			"size" => Self::NativeSize,
			"char" => Self::Char,
			_ => return None,
		};
		Some(shape)
	}

	/// Human-readable type label, e.g. `u32[4]` or `*Node`.
	pub fn type_label(&self) -> String {
		match self {
			Self::Array { element, length } => format!("{}[{length}]", element.type_label()),
			Self::Struct(item) => item.name.to_string(),
			Self::Pointer { pointee, .. } => format!("*{}", pointee.type_label()),
			other => other.kind_name().to_owned(),
		}
	}
}
