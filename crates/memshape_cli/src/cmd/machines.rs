use memshape::memory::{MachineDescriptor, PRESET_NAMES, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// List the machine presets with their widths and byte order.
pub fn run(args: Args) -> Result<()> {
	let mut rows = Vec::with_capacity(PRESET_NAMES.len());
	for &name in PRESET_NAMES {
		let machine = MachineDescriptor::preset(name)?;
		rows.push(MachineJson {
			name,
			pointer_width: machine.pointer_width(),
			int_width: machine.native_int_width(),
			size_width: machine.native_size_width(),
			endian: machine.byte_order().as_str(),
		});
	}

	if args.json {
		return emit_json(&MachinesJson { machines: rows });
	}

	println!("{:<8} {:>3} {:>3} {:>4}  endian", "name", "ptr", "int", "size");
	for row in &rows {
		println!(
			"{:<8} {:>3} {:>3} {:>4}  {}",
			row.name, row.pointer_width, row.int_width, row.size_width, row.endian
		);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct MachinesJson {
	machines: Vec<MachineJson>,
}

#[derive(serde::Serialize)]
struct MachineJson {
	name: &'static str,
	pointer_width: usize,
	int_width: usize,
	size_width: usize,
	endian: &'static str,
}
