mod bind;
mod cursor;
mod decode;
mod error;
mod layout;
mod machine;
mod path;
mod pool;
mod shape;
mod value;

/// Typed destination traits and capability newtypes.
pub use bind::{AssignAddress, Char, FromValue, NativeInt, NativeSize, NativeUint, Shaped, TypedPtr};
/// Bounded read cursor.
pub use cursor::Decoder;
/// Shape-driven decoding entry points and options.
pub use decode::{DecodeOptions, decode_at, decode_instances, decode_into, decode_typed, decode_value};
/// Error and result aliases.
pub use error::{ErrorKind, MemoryError, Result};
/// Static layout calculation.
pub use layout::{FieldOffset, Layout, StructLayout, align_of, align_up, layout_of, offset_of, scalar_width, size_of, struct_layout};
/// Target machine description.
pub use machine::{Endianness, MachineDescriptor, PRESET_NAMES};
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Pools and tagged addresses.
pub use pool::{Address, PoolId, PoolInfo, PoolRegistry};
/// Shape description types.
pub use shape::{Field, StructShape, ValueShape};
/// Decoded runtime value types.
pub use value::{FieldValue, StructValue, Value};
