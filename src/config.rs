//! Runtime configuration for table sizing.
//!
//! Nothing here is read from a file or environment variable: this crate has no outer
//! configuration loader. Callers that want non-default sizing construct a [`RegistryConfig`]
//! and pass it to [`EntityRegistry::with_config`](crate::entities::EntityRegistry::with_config).

/// Target size, in bytes, of a freshly allocated [`EntityTable`](crate::entities::EntityTable).
pub const TARGET_TABLE_BYTES: usize = 16 * 1024;

/// Floor on the row capacity of any newly allocated table, regardless of `entity_size`.
pub const MIN_CAPACITY: usize = 128;

/// Sizing knobs for tables a registry allocates on demand.
#[derive(Debug, Clone, Copy)]
pub struct RegistryConfig {
	/// See [`TARGET_TABLE_BYTES`].
	pub target_table_bytes: usize,
	/// See [`MIN_CAPACITY`].
	pub min_capacity: usize,
}

impl RegistryConfig {
	/// Capacity a new table for entities of `entity_size` bytes should be allocated with.
	pub fn capacity_for(&self, entity_size: usize) -> usize {
		let by_bytes = if entity_size == 0 {
			self.min_capacity
		} else {
			self.target_table_bytes / entity_size
		};
		by_bytes.max(self.min_capacity)
	}
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			target_table_bytes: TARGET_TABLE_BYTES,
			min_capacity: MIN_CAPACITY,
		}
	}
}
