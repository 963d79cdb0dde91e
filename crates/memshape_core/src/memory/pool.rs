use std::collections::BTreeMap;
use std::fmt;

use crate::memory::{MemoryError, Result};

/// Identifier of a logical address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PoolId(pub u32);

impl PoolId {
	/// Default pool: the target application's own memory.
	pub const APPLICATION: Self = Self(0);
}

impl fmt::Display for PoolId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Decoded pointer value: a pool tag and the raw numeric address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address {
	/// Pool the address belongs to.
	pub pool: PoolId,
	/// Raw address as stored in the capture.
	pub raw: u64,
}

impl Address {
	/// Build an address in `pool`.
	pub fn new(pool: PoolId, raw: u64) -> Self {
		Self { pool, raw }
	}

	/// Whether the raw address is zero.
	pub fn is_null(&self) -> bool {
		self.raw == 0
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:0x{:016x}", self.pool, self.raw)
	}
}

/// Descriptive data for one registered pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
	/// Display name.
	pub name: Box<str>,
}

/// Caller-owned mapping of pool identifiers, consulted only to tag pointers.
#[derive(Debug, Clone)]
pub struct PoolRegistry {
	pools: BTreeMap<PoolId, PoolInfo>,
}

impl Default for PoolRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl PoolRegistry {
	/// Registry holding only the application pool.
	pub fn new() -> Self {
		let mut pools = BTreeMap::new();
		pools.insert(PoolId::APPLICATION, PoolInfo { name: "application".into() });
		Self { pools }
	}

	/// Register or rename a pool.
	pub fn register(&mut self, id: PoolId, name: impl Into<Box<str>>) -> &mut Self {
		self.pools.insert(id, PoolInfo { name: name.into() });
		self
	}

	/// Look up a pool.
	pub fn get(&self, id: PoolId) -> Option<&PoolInfo> {
		self.pools.get(&id)
	}

	/// Whether `id` is registered.
	pub fn contains(&self, id: PoolId) -> bool {
		self.pools.contains_key(&id)
	}

	/// Iterate registered pools in id order.
	pub fn iter(&self) -> impl Iterator<Item = (PoolId, &PoolInfo)> {
		self.pools.iter().map(|(id, info)| (*id, info))
	}

	/// Tag a raw pointer value with a registered pool.
	pub fn tag(&self, pool: PoolId, raw: u64) -> Result<Address> {
		if !self.contains(pool) {
			return Err(MemoryError::UnknownPool { pool: pool.0 });
		}
		Ok(Address::new(pool, raw))
	}
}
