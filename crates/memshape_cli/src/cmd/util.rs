use memshape::memory::{Endianness, MachineDescriptor, MemoryError, PoolId, PoolRegistry, Result};

/// Target machine selection shared by every command that lays out shapes.
#[derive(clap::Args, Debug, Clone)]
pub struct MachineArgs {
	/// Named ABI preset.
	#[arg(long, default_value = "x86_64")]
	pub machine: String,
	/// Override the pointer width in bytes.
	#[arg(long = "pointer-width")]
	pub pointer_width: Option<usize>,
	/// Override the native integer width in bytes.
	#[arg(long = "int-width")]
	pub int_width: Option<usize>,
	/// Override the size-type width in bytes.
	#[arg(long = "size-width")]
	pub size_width: Option<usize>,
	/// Override the byte order (`little` or `big`).
	#[arg(long)]
	pub endian: Option<String>,
}

impl MachineArgs {
	/// Resolve the preset and apply overrides in order.
	pub fn resolve(&self) -> Result<MachineDescriptor> {
		let mut machine = MachineDescriptor::preset(&self.machine)?;
		if let Some(width) = self.pointer_width {
			machine = machine.with_pointer_width(width)?;
		}
		if let Some(width) = self.int_width {
			machine = machine.with_native_int_width(width)?;
		}
		if let Some(width) = self.size_width {
			machine = machine.with_native_size_width(width)?;
		}
		if let Some(label) = &self.endian {
			let order = Endianness::parse(label).ok_or_else(|| MemoryError::InvalidMachine {
				reason: format!("unknown byte order {label:?} (expected little or big)"),
			})?;
			machine = machine.with_byte_order(order);
		}
		Ok(machine)
	}
}

/// Parse decimal or `0x`-prefixed hex literal.
pub(crate) fn parse_number(value: &str) -> Result<u64> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u64::from_str_radix(stripped, 16)
	} else {
		value.parse::<u64>()
	};

	parsed.map_err(|_| MemoryError::InvalidNumber { value: value.to_owned() })
}

/// Parse a byte offset literal into a buffer index.
pub(crate) fn parse_offset(value: &str) -> Result<usize> {
	let parsed = parse_number(value)?;
	usize::try_from(parsed).map_err(|_| MemoryError::InvalidNumber { value: value.to_owned() })
}

/// Parse `<id>=<name>` into a pool registration.
pub(crate) fn parse_pool_spec(value: &str) -> Result<(PoolId, String)> {
	let invalid = || MemoryError::InvalidPoolSpec { value: value.to_owned() };
	let (id, name) = value.split_once('=').ok_or_else(invalid)?;
	let name = name.trim();
	if name.is_empty() {
		return Err(invalid());
	}

	let id = parse_number(id.trim()).ok().and_then(|id| u32::try_from(id).ok()).ok_or_else(invalid)?;
	Ok((PoolId(id), name.to_owned()))
}

/// Build a registry holding the application pool plus every `--pool` argument.
pub(crate) fn build_pools(specs: &[String]) -> Result<PoolRegistry> {
	let mut pools = PoolRegistry::new();
	for spec in specs {
		let (id, name) = parse_pool_spec(spec)?;
		pools.register(id, name);
	}
	Ok(pools)
}

/// Render an offset as fixed-width hex.
pub(crate) fn offset_hex(value: usize) -> String {
	format!("0x{value:08x}")
}

/// One-line machine summary.
pub(crate) fn machine_label(machine: &MachineDescriptor) -> String {
	format!(
		"ptr={} int={} size={} {}",
		machine.pointer_width(),
		machine.native_int_width(),
		machine.native_size_width(),
		machine.byte_order().as_str()
	)
}

/// Pretty-print one JSON payload to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::other)?;
	println!("{text}");
	Ok(())
}
