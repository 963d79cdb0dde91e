//! Binding decoded values into Rust destinations.
//!
//! A shape and a destination type are paired by the caller. Pairs that do not
//! fit fail with [`MemoryError::Binding`] instead of panicking, since a shape
//! tree can be loaded at runtime.

use std::fmt;
use std::marker::PhantomData;

use crate::memory::{Address, MemoryError, PoolId, Result, StructValue, Value, ValueShape};

/// Destination that can be populated from a decoded [`Value`].
pub trait FromValue: Sized {
	/// Convert `value`, failing when the kind does not fit.
	fn from_value(value: Value) -> Result<Self>;
}

/// Rust type that knows the target shape it mirrors.
pub trait Shaped {
	/// Shape of one value of this type in target memory.
	fn shape() -> ValueShape;
}

/// Capability of accepting a decoded pointer.
///
/// Only pointer representations implement this; it is what lets a
/// `Pointer`-shaped value bind to a destination.
pub trait AssignAddress {
	/// Store `address`.
	fn assign_address(&mut self, address: Address);
}

fn mismatch(expected: &'static str, value: &Value) -> MemoryError {
	MemoryError::Binding {
		expected,
		got: value.kind_name().to_owned(),
	}
}

fn out_of_range(value: impl fmt::Display, target: &'static str) -> MemoryError {
	MemoryError::ValueOutOfRange {
		value: value.to_string(),
		target,
	}
}

fn bind_address<P: AssignAddress + Default>(value: Value, expected: &'static str) -> Result<P> {
	match value {
		Value::Ptr(address) => {
			let mut out = P::default();
			out.assign_address(address);
			Ok(out)
		}
		other => Err(mismatch(expected, &other)),
	}
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self> {
		Ok(value)
	}
}

impl FromValue for StructValue {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Struct(item) => Ok(item),
			other => Err(mismatch("struct", &other)),
		}
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Bool(v) => Ok(v),
			other => Err(mismatch("bool", &other)),
		}
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::String(v) => Ok(v.into_string()),
			other => Err(mismatch("string", &other)),
		}
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::F64(v) => Ok(v),
			Value::F32(v) => Ok(f64::from(v)),
			other => Err(mismatch("f64", &other)),
		}
	}
}

impl FromValue for f32 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::F32(v) => Ok(v),
			other => Err(mismatch("f32", &other)),
		}
	}
}

macro_rules! integer_from_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromValue for $ty {
				fn from_value(value: Value) -> Result<Self> {
					match value {
						Value::I64(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, stringify!($ty))),
						Value::U64(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, stringify!($ty))),
						other => Err(mismatch(stringify!($ty), &other)),
					}
				}
			}
		)*
	};
}

integer_from_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl FromValue for Address {
	fn from_value(value: Value) -> Result<Self> {
		bind_address(value, "pointer")
	}
}

impl AssignAddress for Address {
	fn assign_address(&mut self, address: Address) {
		*self = address;
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Array(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(mismatch("array", &other)),
		}
	}
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
	fn from_value(value: Value) -> Result<Self> {
		let items = match value {
			Value::Array(items) => items,
			other => return Err(mismatch("array", &other)),
		};
		if items.len() != N {
			return Err(MemoryError::Binding {
				expected: "array of matching length",
				got: format!("array[{}], destination [{N}]", items.len()),
			});
		}

		let bound: Vec<T> = items.into_iter().map(T::from_value).collect::<Result<_>>()?;
		bound.try_into().map_err(|_| MemoryError::Binding {
			expected: "array of matching length",
			got: "array".to_owned(),
		})
	}
}

impl StructValue {
	/// Remove field `name` and bind it into `T`.
	pub fn take_as<T: FromValue>(&mut self, name: &str) -> Result<T> {
		let value = self.take(name).ok_or_else(|| MemoryError::Binding {
			expected: "struct field",
			got: format!("no field {name:?} on {}", self.type_name),
		})?;
		T::from_value(value)
	}
}

/// Pointer to a `T` in some pool; records the address, never dereferences it.
pub struct TypedPtr<T> {
	address: Address,
	_pointee: PhantomData<fn() -> T>,
}

impl<T> TypedPtr<T> {
	/// Wrap an address.
	pub fn new(address: Address) -> Self {
		Self {
			address,
			_pointee: PhantomData,
		}
	}

	/// Recorded address.
	pub fn address(&self) -> Address {
		self.address
	}

	/// Whether the raw address is zero.
	pub fn is_null(&self) -> bool {
		self.address.is_null()
	}
}

impl<T> Default for TypedPtr<T> {
	fn default() -> Self {
		Self::new(Address::default())
	}
}

impl<T> Clone for TypedPtr<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for TypedPtr<T> {}

impl<T> PartialEq for TypedPtr<T> {
	fn eq(&self, other: &Self) -> bool {
		self.address == other.address
	}
}

impl<T> Eq for TypedPtr<T> {}

impl<T> fmt::Debug for TypedPtr<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypedPtr({})", self.address)
	}
}

impl<T> AssignAddress for TypedPtr<T> {
	fn assign_address(&mut self, address: Address) {
		self.address = address;
	}
}

impl<T> FromValue for TypedPtr<T> {
	fn from_value(value: Value) -> Result<Self> {
		bind_address(value, "pointer")
	}
}

impl<T: Shaped> Shaped for TypedPtr<T> {
	fn shape() -> ValueShape {
		ValueShape::pointer_in(PoolId::APPLICATION, T::shape())
	}
}

macro_rules! capability_newtype {
	($(#[$doc:meta])* $name:ident($inner:ty) => $shape:ident) => {
		$(#[$doc])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
		pub struct $name(pub $inner);

		impl Shaped for $name {
			fn shape() -> ValueShape {
				ValueShape::$shape
			}
		}

		impl FromValue for $name {
			fn from_value(value: Value) -> Result<Self> {
				<$inner>::from_value(value).map(Self)
			}
		}
	};
}

capability_newtype!(
	/// Signed integer of the target's native width.
	NativeInt(i64) => NativeInt
);
capability_newtype!(
	/// Unsigned integer of the target's native width.
	NativeUint(u64) => NativeUint
);
capability_newtype!(
	/// Size-type value of the target.
	NativeSize(u64) => NativeSize
);
capability_newtype!(
	/// Single byte character.
	Char(u8) => Char
);

macro_rules! primitive_shaped {
	($($ty:ty => $shape:ident),* $(,)?) => {
		$(
			impl Shaped for $ty {
				fn shape() -> ValueShape {
					ValueShape::$shape
				}
			}
		)*
	};
}

primitive_shaped!(
	bool => Bool,
	i8 => Int8,
	i16 => Int16,
	i32 => Int32,
	i64 => Int64,
	u8 => Uint8,
	u16 => Uint16,
	u32 => Uint32,
	u64 => Uint64,
	f32 => Float32,
	f64 => Float64,
	String => String,
);

impl<T: Shaped, const N: usize> Shaped for [T; N] {
	fn shape() -> ValueShape {
		ValueShape::array(T::shape(), N)
	}
}
