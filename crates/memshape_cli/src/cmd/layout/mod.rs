use std::path::PathBuf;

use memshape::memory::{FieldPath, MachineDescriptor, Result, ValueShape, layout_of, offset_of, struct_layout};

use crate::cmd::util::{MachineArgs, emit_json, machine_label};
use crate::shape_file;

#[derive(clap::Args)]
pub struct Args {
	pub shape: PathBuf,
	#[command(flatten)]
	pub machine: MachineArgs,
	#[arg(long = "field")]
	pub field: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print the static size, alignment and field offsets of a shape file's root.
pub fn run(args: Args) -> Result<()> {
	let Args { shape, machine, field, json } = args;

	let machine = machine.resolve()?;
	let loaded = shape_file::load(&shape)?;
	let root = &loaded.root;
	let layout = layout_of(root, &machine);

	let fields = field_rows(root, &machine);
	let selected = match &field {
		Some(expr) => {
			let path = FieldPath::parse(expr)?;
			let (offset, target) = offset_of(root, &path, &machine)?;
			let target_layout = layout_of(target, &machine);
			Some(FieldJson {
				name: path.to_string(),
				offset,
				size: target_layout.size,
				align: target_layout.align,
				ty: target.type_label(),
			})
		}
		None => None,
	};

	if json {
		let payload = LayoutJson {
			shape: shape.display().to_string(),
			root: loaded.label,
			machine: machine_label(&machine),
			size: layout.size,
			align: layout.align,
			fields,
			field: selected,
		};
		return emit_json(&payload);
	}

	println!("shape: {}", shape.display());
	println!("root: {}", loaded.label);
	println!("machine: {}", machine_label(&machine));
	println!("size: {}", layout.size);
	println!("align: {}", layout.align);

	if let Some(selected) = selected {
		println!("field: {}", selected.name);
		println!("offset: {}", selected.offset);
		println!("field_size: {}", selected.size);
		println!("field_align: {}", selected.align);
		println!("type: {}", selected.ty);
		return Ok(());
	}

	if !fields.is_empty() {
		println!("fields:");
		for row in &fields {
			println!("  {:>6} {:>6} {:>3}  {}: {}", row.offset, row.size, row.align, row.name, row.ty);
		}
	}
	if let ValueShape::Struct(item) = root {
		let padding = struct_layout(item, &machine).tail_padding();
		if padding > 0 {
			println!("tail_padding: {padding}");
		}
	}

	Ok(())
}

fn field_rows(root: &ValueShape, machine: &MachineDescriptor) -> Vec<FieldJson> {
	let ValueShape::Struct(item) = root else {
		return Vec::new();
	};

	struct_layout(item, machine)
		.fields
		.into_iter()
		.zip(&item.fields)
		.map(|(offset, field)| FieldJson {
			name: offset.name.to_string(),
			offset: offset.offset,
			size: offset.size,
			align: offset.align,
			ty: field.shape.type_label(),
		})
		.collect()
}

#[derive(serde::Serialize)]
struct LayoutJson {
	shape: String,
	root: String,
	machine: String,
	size: usize,
	align: usize,
	fields: Vec<FieldJson>,
	#[serde(skip_serializing_if = "Option::is_none")]
	field: Option<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	offset: usize,
	size: usize,
	align: usize,
	#[serde(rename = "type")]
	ty: String,
}

#[cfg(test)]
mod tests;
