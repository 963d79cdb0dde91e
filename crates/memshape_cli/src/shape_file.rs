//! JSON shape description files.
//!
//! ```json
//! {
//!   "types": {
//!     "Node": { "struct": [
//!       { "name": "tag", "type": "char" },
//!       { "name": "next", "type": { "pointer": "Node" } }
//!     ] }
//!   },
//!   "root": "Node"
//! }
//! ```
//!
//! A type reference is a kind label (`u32`, `size`, ...), the name of an entry
//! in `types`, or an inline `array`/`pointer`/`struct` object.

use std::collections::BTreeMap;
use std::path::Path;

use memshape::memory::{MemoryError, PoolId, Result, StructShape, ValueShape};
use serde::Deserialize;

/// Parsed file, before name resolution.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeFile {
	/// Named type definitions.
	#[serde(default)]
	pub types: BTreeMap<String, TypeRef>,
	/// Type decoded at the capture offset.
	pub root: TypeRef,
}

/// Reference to a type inside a shape file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
	/// Kind label or named type.
	Name(String),
	/// Inline array.
	Array(ArraySpec),
	/// Pointer into a pool.
	Pointer(PointerSpec),
	/// Inline struct.
	Struct(StructSpec),
	/// Anything else; rejected during resolution.
	Other(serde_json::Value),
}

/// `{"array": T, "len": N}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
	array: Box<TypeRef>,
	len: usize,
}

/// `{"pointer": T, "pool": id}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointerSpec {
	pointer: Box<TypeRef>,
	#[serde(default)]
	pool: u32,
}

/// `{"struct": [fields], "name": "Label"}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructSpec {
	#[serde(rename = "struct")]
	fields: Vec<FieldSpec>,
	#[serde(default)]
	name: Option<String>,
}

/// One struct member.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
	name: String,
	#[serde(rename = "type")]
	ty: TypeRef,
}

/// Loaded and resolved shape.
#[derive(Debug, Clone)]
pub struct LoadedShape {
	/// Resolved root shape.
	pub root: ValueShape,
	/// Display label of the root.
	pub label: String,
}

/// Read, parse and resolve a shape file.
pub fn load(path: &Path) -> Result<LoadedShape> {
	let text = std::fs::read_to_string(path)?;
	let loaded = parse(&text)?;
	tracing::debug!(path = %path.display(), root = %loaded.label, "loaded shape file");
	Ok(loaded)
}

/// Parse and resolve shape file text.
pub fn parse(text: &str) -> Result<LoadedShape> {
	let file: ShapeFile = serde_json::from_str(text).map_err(|err| MemoryError::InvalidShapeSpec { reason: err.to_string() })?;
	file.resolve()
}

impl ShapeFile {
	/// Resolve the root reference into a finite shape tree.
	pub fn resolve(&self) -> Result<LoadedShape> {
		let mut resolver = Resolver {
			types: &self.types,
			stack: Vec::new(),
			pointer_depth: 0,
		};
		let root = resolver.resolve(&self.root, None)?;
		Ok(LoadedShape {
			label: root.type_label(),
			root,
		})
	}
}

struct Resolver<'a> {
	types: &'a BTreeMap<String, TypeRef>,
	/// Named types being expanded, with the pointer depth at which expansion began.
	stack: Vec<(&'a str, usize)>,
	pointer_depth: usize,
}

impl<'a> Resolver<'a> {
	fn resolve(&mut self, ty: &'a TypeRef, name_hint: Option<&'a str>) -> Result<ValueShape> {
		match ty {
			TypeRef::Name(name) => self.resolve_name(name),
			TypeRef::Array(spec) => Ok(ValueShape::array(self.resolve(&spec.array, None)?, spec.len)),
			TypeRef::Pointer(spec) => {
				self.pointer_depth += 1;
				let pointee = self.resolve(&spec.pointer, None);
				self.pointer_depth -= 1;
				Ok(ValueShape::pointer_in(PoolId(spec.pool), pointee?))
			}
			TypeRef::Struct(spec) => {
				let name = spec.name.as_deref().or(name_hint).unwrap_or("anonymous");
				let mut fields = Vec::with_capacity(spec.fields.len());
				for field in &spec.fields {
					fields.push((field.name.as_str(), self.resolve(&field.ty, None)?));
				}
				Ok(ValueShape::structure(name, fields))
			}
			TypeRef::Other(value) => Err(MemoryError::UnsupportedShape { kind: other_kind(value) }),
		}
	}

	fn resolve_name(&mut self, name: &'a str) -> Result<ValueShape> {
		if let Some(shape) = ValueShape::primitive_from_name(name) {
			return Ok(shape);
		}

		let types = self.types;
		let Some((key, ty)) = types.get_key_value(name) else {
			return Err(MemoryError::UnsupportedShape { kind: name.to_owned() });
		};

		if let Some(&(_, depth)) = self.stack.iter().find(|(open, _)| *open == name) {
			if self.pointer_depth > depth {
				return Ok(ValueShape::Struct(StructShape {
					name: name.into(),
					fields: Vec::new(),
				}));
			}
			return Err(MemoryError::InvalidShapeSpec {
				reason: format!("type {name} contains itself by value"),
			});
		}

		self.stack.push((key.as_str(), self.pointer_depth));
		let shape = self.resolve(ty, Some(key.as_str()));
		self.stack.pop();
		shape
	}
}

fn other_kind(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::Object(map) => map.keys().next().cloned().unwrap_or_else(|| "{}".to_owned()),
		other => other.to_string(),
	}
}
