use crate::memory::{Address, FieldPath, PathStep};

/// Runtime value emitted by shape-driven decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar, sign-extended.
	I64(i64),
	/// Unsigned integer scalar, zero-extended.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 lossy decoded string.
	String(Box<str>),
	/// Pool-tagged pointer value.
	Ptr(Address),
	/// Array elements in memory order.
	Array(Vec<Value>),
	/// Struct-shaped decoded value.
	Struct(StructValue),
}

/// Decoded struct value with field names preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Struct type name from the shape.
	pub type_name: Box<str>,
	/// Decoded field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// Named decoded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Decoded field payload.
	pub value: Value,
}

impl Value {
	/// Stable label for the value kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Ptr(_) => "pointer",
			Self::Array(_) => "array",
			Self::Struct(_) => "struct",
		}
	}

	/// Follow `path` through struct fields and array elements.
	pub fn select(&self, path: &FieldPath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current) {
				(PathStep::Field(name), Self::Struct(item)) => item.field(name)?,
				(PathStep::Index(idx), Self::Array(items)) => items.get(*idx)?,
				_ => return None,
			};
		}
		Some(current)
	}
}

impl StructValue {
	/// Look up a field value by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Remove and return a field value by name.
	pub fn take(&mut self, name: &str) -> Option<Value> {
		let idx = self.fields.iter().position(|field| field.name.as_ref() == name)?;
		Some(self.fields.remove(idx).value)
	}
}
