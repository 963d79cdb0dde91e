use std::fmt::Write as _;

use memshape::memory::Value;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree.
pub fn print_value(value: &Value, indent: usize, options: PrintOptions) {
	let mut out = String::new();
	render_value(&mut out, value, indent, 0, options);
	print!("{out}");
}

/// Render one decoded value tree into `out`, one line per leaf.
pub fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Bool(v) => line(out, &pad, v),
		Value::I64(v) => line(out, &pad, v),
		Value::U64(v) => line(out, &pad, v),
		Value::F32(v) => line(out, &pad, v),
		Value::F64(v) => line(out, &pad, v),
		Value::String(v) => line(out, &pad, format_args!("\"{}\"", truncate(v, options.max_string_len))),
		Value::Ptr(v) => line(out, &pad, v),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("[... {} items]", items.len()));
				return;
			}
			line(out, &pad, "[");
			for item in items.iter().take(options.max_array_items) {
				render_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				line(out, &pad, format_args!("  ... {} more", items.len() - options.max_array_items));
			}
			line(out, &pad, "]");
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("{} {{ ... }}", item.type_name));
				return;
			}
			line(out, &pad, format_args!("{} {{", item.type_name));
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				let _ = write!(out, "{pad}  {} = ", field.name);
				if matches!(field.value, Value::Struct(_) | Value::Array(_)) {
					out.push('\n');
					render_value(out, &field.value, indent + 4, depth + 1, options);
				} else {
					render_value(out, &field.value, 0, depth + 1, options);
				}
			}
			if item.fields.len() > options.max_fields_per_struct {
				line(out, &pad, format_args!("  ... {} more fields", item.fields.len() - options.max_fields_per_struct));
			}
			line(out, &pad, "}");
		}
	}
}

/// Convert a decoded value into JSON; structs become `{type, fields}`.
pub fn value_to_json_value(value: &Value) -> serde_json::Value {
	use serde_json::{Map, Value as JsonValue};

	match value {
		Value::Bool(v) => serde_json::json!(v),
		Value::I64(v) => serde_json::json!(v),
		Value::U64(v) => serde_json::json!(v),
		Value::F32(v) => serde_json::json!(v),
		Value::F64(v) => serde_json::json!(v),
		Value::String(v) => serde_json::json!(v),
		Value::Ptr(v) => serde_json::json!(v.to_string()),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json_value).collect()),
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.fields
				.iter()
				.map(|field| (field.name.to_string(), value_to_json_value(&field.value)))
				.collect();

			let mut out = Map::new();
			out.insert("type".to_owned(), serde_json::json!(item.type_name.as_ref()));
			out.insert("fields".to_owned(), JsonValue::Object(fields));
			JsonValue::Object(out)
		}
	}
}

fn line(out: &mut String, pad: &str, text: impl std::fmt::Display) {
	let _ = writeln!(out, "{pad}{text}");
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use memshape::memory::{Address, FieldValue, PoolId, StructValue, Value};

	use super::{PrintOptions, render_value, value_to_json_value};

	fn sample() -> Value {
		Value::Struct(StructValue {
			type_name: "Node".into(),
			fields: vec![
				FieldValue {
					name: "name".into(),
					value: Value::String("abcdef".into()),
				},
				FieldValue {
					name: "items".into(),
					value: Value::Array(vec![Value::U64(1), Value::U64(2), Value::U64(3)]),
				},
				FieldValue {
					name: "next".into(),
					value: Value::Ptr(Address::new(PoolId(2), 0x40)),
				},
			],
		})
	}

	#[test]
	fn render_truncates_strings_and_arrays() {
		let options = PrintOptions {
			max_string_len: 3,
			max_array_items: 2,
			..PrintOptions::default()
		};
		let mut out = String::new();
		render_value(&mut out, &sample(), 0, 0, options);

		let expected = "Node {\n  name = \"abc...\"\n  items = \n    [\n      1\n      2\n      ... 1 more\n    ]\n  next = 2:0x0000000000000040\n}\n";
		assert_eq!(out, expected);
	}

	#[test]
	fn render_stops_at_print_depth() {
		let options = PrintOptions {
			max_print_depth: 0,
			..PrintOptions::default()
		};
		let mut out = String::new();
		render_value(&mut out, &sample(), 2, 0, options);
		assert_eq!(out, "  Node { ... }\n");
	}

	#[test]
	fn json_keeps_struct_type_and_pool_tagged_pointers() {
		let json = value_to_json_value(&sample());
		assert_eq!(json["type"], "Node");
		assert_eq!(json["fields"]["name"], "abcdef");
		assert_eq!(json["fields"]["items"][2], 3);
		assert_eq!(json["fields"]["next"], "2:0x0000000000000040");
	}
}
