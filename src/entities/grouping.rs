use crate::archetypes::EntityArchetype;
use crate::entities::EntityTable;
use parking_lot::RwLock;
use std::sync::Arc;

/// A handle to a table shared between a grouping and any in-flight reads of it.
pub type TableHandle = Arc<RwLock<EntityTable>>;

/// An insertion-ordered, copy-on-write list of tables that all share one archetype.
///
/// `add`/`remove` return a new [`EntityGrouping`]; the owning [`EntityLookup`](crate::entities::EntityLookup)
/// snapshot is what actually publishes the replacement.
#[derive(Clone)]
pub struct EntityGrouping {
	key: EntityArchetype,
	tables: Vec<TableHandle>,
}

impl EntityGrouping {
	pub(crate) fn new(key: EntityArchetype) -> Self {
		Self { key, tables: Vec::new() }
	}

	/// The archetype shared by every table in this grouping.
	pub fn key(&self) -> &EntityArchetype {
		&self.key
	}

	/// Number of tables currently in this grouping.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	/// Whether this grouping currently has no tables.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// The table at position `index`, if any.
	pub fn get(&self, index: usize) -> Option<&TableHandle> {
		self.tables.get(index)
	}

	/// Iterate the tables of this grouping, in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &TableHandle> {
		self.tables.iter()
	}

	/// The first table with at least one free row, if any.
	pub(crate) fn first_with_free_row(&self) -> Option<&TableHandle> {
		self.tables.iter().find(|table| !table.read().is_full())
	}

	/// A new grouping with `table` appended.
	pub(crate) fn with_table_added(&self, table: TableHandle) -> Self {
		let mut tables = self.tables.clone();
		tables.push(table);
		Self { key: self.key.clone(), tables }
	}

	/// A new grouping with the first reference-equal match to `table` removed.
	pub(crate) fn with_table_removed(&self, table: &TableHandle) -> Self {
		let mut tables = self.tables.clone();
		if let Some(pos) = tables.iter().position(|t| Arc::ptr_eq(t, table)) {
			tables.remove(pos);
		}
		Self { key: self.key.clone(), tables }
	}
}
