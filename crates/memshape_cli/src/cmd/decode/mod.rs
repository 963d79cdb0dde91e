use std::path::PathBuf;

use memshape::memory::{DecodeOptions, Decoder, FieldPath, MemoryError, Result, Value, decode_instances};

use crate::cmd::print::{PrintOptions, print_value, value_to_json_value};
use crate::cmd::util::{MachineArgs, build_pools, emit_json, machine_label, offset_hex, parse_offset};
use crate::shape_file;

#[derive(clap::Args)]
pub struct Args {
	pub capture: PathBuf,
	pub shape: PathBuf,
	#[command(flatten)]
	pub machine: MachineArgs,
	#[arg(long = "pool")]
	pub pools: Vec<String>,
	#[arg(long, default_value = "0")]
	pub offset: String,
	#[arg(long, default_value_t = 1)]
	pub count: usize,
	#[arg(long = "field")]
	pub field: Option<String>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "strict")]
	pub strict_layout: bool,
}

/// Decode `count` consecutive root values from a capture file and print them.
pub fn run(args: Args) -> Result<()> {
	let Args {
		capture,
		shape,
		machine,
		pools,
		offset,
		count,
		field,
		json,
		max_depth,
		max_array,
		strict_layout,
	} = args;

	let machine = machine.resolve()?;
	let pools = build_pools(&pools)?;
	let start = parse_offset(&offset)?;
	let field_path = field.as_deref().map(FieldPath::parse).transpose()?;
	let loaded = shape_file::load(&shape)?;
	let bytes = std::fs::read(&capture)?;

	let mut decode = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		decode.max_depth = max_depth;
	}
	if let Some(max_array) = max_array {
		decode.max_array_elems = max_array;
	}
	decode.strict_layout = strict_layout;

	let mut print = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		print.max_print_depth = max_depth;
	}
	if let Some(max_array) = max_array {
		print.max_array_items = max_array;
	}

	let mut decoder = Decoder::at(&bytes, start, machine)?;
	let values = decode_instances(&mut decoder, &loaded.root, count, &pools, &decode, None)?;
	let end = decoder.pos();

	let values = match &field_path {
		Some(path) => values
			.iter()
			.map(|value| value.select(path).cloned().ok_or_else(|| MemoryError::FieldNotFound { path: path.to_string() }))
			.collect::<Result<Vec<Value>>>()?,
		None => values,
	};

	if json {
		let payload = DecodeJson {
			capture: capture.display().to_string(),
			shape: shape.display().to_string(),
			root: loaded.label,
			machine: machine_label(&machine),
			field: field_path.map(|path| path.to_string()),
			start: offset_hex(start),
			end: offset_hex(end),
			count: values.len(),
			values: values.iter().map(value_to_json_value).collect(),
		};
		return emit_json(&payload);
	}

	println!("capture: {}", capture.display());
	println!("shape: {}", shape.display());
	println!("root: {}", loaded.label);
	println!("machine: {}", machine_label(&machine));
	if let Some(path) = &field_path {
		println!("field: {path}");
	}
	println!("start: {}", offset_hex(start));
	println!("end: {}", offset_hex(end));
	for (idx, value) in values.iter().enumerate() {
		println!("value[{idx}]:");
		print_value(value, 2, print);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	capture: String,
	shape: String,
	root: String,
	machine: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	field: Option<String>,
	start: String,
	end: String,
	count: usize,
	values: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests;
