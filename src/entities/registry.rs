use crate::archetypes::EntityArchetype;
use crate::components::{Component, ComponentType};
use crate::config::RegistryConfig;
use crate::entities::grouping::TableHandle;
use crate::entities::table::RegistryId;
use crate::entities::{Entity, EntityGrouping, EntityLookup, EntityTable, LookupHandle};
use crate::error::{EcsError, EcsResult};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone)]
struct Record {
	table: Option<TableHandle>,
	index: u32,
	version: u32,
}

impl Default for Record {
	fn default() -> Self {
		Self { table: None, index: 0, version: 0 }
	}
}

struct RegistryInner {
	records: Vec<Record>,
	free_list: Vec<u32>,
}

/// The central facade coordinating entity creation, destruction, archetype transformation, and
/// component mutation.
///
/// All mutations are serialized through [`inner`](Self::inner)'s mutex (the "sync point"); the
/// lookup snapshot is published through a `parking_lot::RwLock<Arc<_>>` so read-only observers
/// never block on it for long. A single registry may be wrapped in an `Arc` and shared across
/// threads: writers still serialize on the mutex, readers never do.
pub struct EntityRegistry {
	id: RegistryId,
	config: RegistryConfig,
	inner: Mutex<RegistryInner>,
	lookup: LookupHandle,
}

impl EntityRegistry {
	/// A new, empty registry using the default table-sizing configuration.
	pub fn new() -> Self {
		Self::with_config(RegistryConfig::default())
	}

	/// A new, empty registry using the supplied table-sizing configuration.
	pub fn with_config(config: RegistryConfig) -> Self {
		let id = RegistryId(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed));
		Self {
			id,
			config,
			inner: Mutex::new(RegistryInner { records: Vec::new(), free_list: Vec::new() }),
			lookup: Arc::new(RwLock::new(Arc::new(EntityLookup::new()))),
		}
	}

	/// A shared handle to this registry's current lookup snapshot, for building [`EntityQuery`](crate::entities::EntityQuery)s.
	pub fn lookup_handle(&self) -> LookupHandle {
		self.lookup.clone()
	}

	/// Number of live entities.
	pub fn count(&self) -> usize {
		let inner = self.inner.lock();
		inner.records.len() - inner.free_list.len()
	}

	/// Whether `entity` resolves to a live record.
	pub fn contains(&self, entity: Entity) -> bool {
		let inner = self.inner.lock();
		Self::resolve(&inner.records, entity).is_some()
	}

	/// The table and row index `entity` currently occupies, if it is live.
	pub fn find(&self, entity: Entity) -> Option<(TableHandle, usize)> {
		let inner = self.inner.lock();
		let record = Self::resolve(&inner.records, entity)?;
		Some((record.table.clone().unwrap(), record.index as usize))
	}

	/// Whether `entity` is live and its archetype includes `ty`.
	pub fn has_component(&self, entity: Entity, ty: &ComponentType) -> bool {
		match self.find(entity) {
			Some((table, _)) => table.read().archetype().contains(ty),
			None => false,
		}
	}

	/// Copy out the value of `T` on `entity`, if it is live and carries that component.
	pub fn try_get_component<T: Component + Copy>(&self, entity: Entity) -> Option<T> {
		let (table, index) = self.find(entity)?;
		let guard = table.read();
		guard.try_get_components::<T>()?.get(index).copied()
	}

	/// Borrow the value of `T` on `entity` for the duration of `f`, if it is live and carries that component.
	pub fn with_component<T: Component>(&self, entity: Entity, f: impl FnOnce(&T)) -> bool {
		match self.find(entity) {
			Some((table, index)) => {
				let guard = table.read();
				match guard.try_get_components::<T>().and_then(|slice| slice.get(index)) {
					Some(value) => {
						f(value);
						true
					},
					None => false,
				}
			},
			None => false,
		}
	}

	/// Create an entity with the empty (`Base`) archetype.
	pub fn create(&self) -> Entity {
		self.create_with_archetype(&EntityArchetype::base())
	}

	/// Create an entity belonging to `archetype`.
	pub fn create_with_archetype(&self, archetype: &EntityArchetype) -> Entity {
		let table = self.find_or_create_destination_table(archetype);
		let mut inner = self.inner.lock();
		let (index, version) = Self::allocate_index(&mut inner);
		let row = table.write().add(Entity { index, version }).expect("table returned by find-or-create has free rows");
		inner.records[index as usize] = Record { table: Some(table), index: row as u32, version };
		tracing::trace!(entity_index = index, "created entity");
		Entity { index, version }
	}

	/// Create an entity directly in `table`, which must be owned by this registry and not full.
	/// If `table` was empty (e.g. orphaned after its last row was destroyed), it is republished
	/// into its grouping.
	pub fn create_in_table(&self, table: TableHandle) -> EcsResult<Entity> {
		if table.read().owner() != self.id {
			return Err(EcsError::UnmodifiableTable);
		}
		if table.read().is_full() {
			return Err(EcsError::TableFull);
		}

		let mut inner = self.inner.lock();
		if table.read().is_empty() {
			let archetype = table.read().archetype().clone();
			self.publish_table_if_absent(&archetype, &table);
		}

		let (index, version) = Self::allocate_index(&mut inner);
		let row = table.write().add(Entity { index, version })?;
		inner.records[index as usize] = Record { table: Some(table), index: row as u32, version };
		Ok(Entity { index, version })
	}

	/// Destroy `entity`. Returns `false` if it was already gone.
	pub fn destroy(&self, entity: Entity) -> bool {
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = match Self::resolve_owned(&inner.records, entity) {
			Some(record) => record,
			None => return false,
		};

		let table = record.table.clone().unwrap();
		let moved = table.write().remove_at(record.index as usize).expect("record's row index is always in range");
		if let Some(moved_entity) = moved {
			inner.records[moved_entity.index() as usize].index = record.index;
		}

		if table.read().is_empty() {
			let archetype = table.read().archetype().clone();
			self.remove_table_from_grouping(&table, &archetype);
		}

		inner.records[idx] = Record { table: None, index: 0, version: record.version.wrapping_add(1) };
		inner.free_list.push(idx as u32);
		tracing::trace!(entity_index = idx, "destroyed entity");
		true
	}

	/// Move `entity` to `archetype`, preserving the values of components both archetypes share.
	/// A no-op if `entity` is already in `archetype`.
	pub fn transform(&self, entity: Entity, archetype: &EntityArchetype) -> EcsResult<()> {
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let src_table = record.table.clone().unwrap();
		if src_table.read().archetype() == archetype {
			return Ok(());
		}

		self.relocate_to_archetype(&mut inner, idx, record, archetype)
	}

	/// Move `entity` directly into `destination`, which must be owned by this registry and not full.
	pub fn move_to(&self, entity: Entity, destination: TableHandle) -> EcsResult<()> {
		if destination.read().owner() != self.id {
			return Err(EcsError::UnmodifiableTable);
		}
		if destination.read().is_full() {
			return Err(EcsError::TableFull);
		}

		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;
		self.relocate(&mut inner, idx, record, destination)
	}

	/// Add `ty` to `entity`'s archetype with a default-initialized value. Returns `false` if
	/// already present.
	pub fn add_component(&self, entity: Entity, ty: ComponentType) -> EcsResult<bool> {
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let src_archetype = record.table.as_ref().unwrap().read().archetype().clone();
		if src_archetype.contains(&ty) {
			return Ok(false);
		}

		let dst_archetype = src_archetype.add(ty);
		self.relocate_to_archetype(&mut inner, idx, record, &dst_archetype)?;
		Ok(true)
	}

	/// Remove `ty` from `entity`'s archetype. Returns `false` if not present.
	pub fn remove_component(&self, entity: Entity, ty: &ComponentType) -> EcsResult<bool> {
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let src_archetype = record.table.as_ref().unwrap().read().archetype().clone();
		if !src_archetype.contains(ty) {
			return Ok(false);
		}

		let dst_archetype = src_archetype.remove(ty);
		self.relocate_to_archetype(&mut inner, idx, record, &dst_archetype)?;
		Ok(true)
	}

	/// Add component `T` to `entity` with `value`. Returns `false` if already present.
	pub fn add_component_value<T: Component>(&self, entity: Entity, value: T) -> EcsResult<bool> {
		let ty = ComponentType::of::<T>();
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let src_archetype = record.table.as_ref().unwrap().read().archetype().clone();
		if src_archetype.contains(&ty) {
			return Ok(false);
		}

		let dst_archetype = src_archetype.add(ty);
		self.relocate_to_archetype(&mut inner, idx, record, &dst_archetype)?;

		let table = inner.records[idx].table.clone().unwrap();
		let row = inner.records[idx].index as usize;
		table.write().set_component(row, value)?;
		tracing::trace!(entity_index = idx, "added component");
		Ok(true)
	}

	/// Remove component `T` from `entity`, returning its value if it was present.
	pub fn remove_component_value<T: Component + Copy>(&self, entity: Entity) -> EcsResult<Option<T>> {
		let ty = ComponentType::of::<T>();
		let mut inner = self.inner.lock();
		let idx = entity.index() as usize;
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let src_table = record.table.clone().unwrap();
		let (src_archetype, old_value) = {
			let guard = src_table.read();
			let archetype = guard.archetype().clone();
			if !archetype.contains(&ty) {
				return Ok(None);
			}
			let value = guard.try_get_components::<T>().and_then(|slice| slice.get(record.index as usize).copied());
			(archetype, value)
		};

		let dst_archetype = src_archetype.remove(&ty);
		self.relocate_to_archetype(&mut inner, idx, record, &dst_archetype)?;
		Ok(old_value)
	}

	/// Overwrite the value of `T` on `entity`. Returns `false` if `entity` does not carry `T`.
	pub fn set_component<T: Component>(&self, entity: Entity, value: T) -> EcsResult<bool> {
		let inner = self.inner.lock();
		let record = Self::resolve_owned(&inner.records, entity).ok_or(EcsError::EntityNotFound)?;

		let table = record.table.unwrap();
		let result = match table.write().set_component(record.index as usize, value) {
			Ok(()) => Ok(true),
			Err(EcsError::ComponentTypeMissing) => Ok(false),
			Err(error) => Err(error),
		};
		drop(inner);
		result
	}

	fn resolve(records: &[Record], entity: Entity) -> Option<&Record> {
		let record = records.get(entity.index() as usize)?;
		if record.table.is_none() || record.version != entity.version() {
			return None;
		}
		Some(record)
	}

	fn resolve_owned(records: &[Record], entity: Entity) -> Option<Record> {
		Self::resolve(records, entity).cloned()
	}

	fn allocate_index(inner: &mut RegistryInner) -> (u32, u32) {
		if let Some(index) = inner.free_list.pop() {
			let version = inner.records[index as usize].version;
			(index, version)
		} else {
			let index = inner.records.len() as u32;
			inner.records.push(Record::default());
			(index, 0)
		}
	}

	/// Look up the grouping for `archetype`, returning the first table with a free row, or
	/// allocate and publish a new one. Must only be called while `inner` is locked.
	fn find_or_create_destination_table(&self, archetype: &EntityArchetype) -> TableHandle {
		{
			let snapshot = self.lookup.read().clone();
			if let Some(grouping) = snapshot.try_get(archetype) {
				if let Some(table) = grouping.first_with_free_row() {
					return table.clone();
				}
			}
		}

		let capacity = self.config.capacity_for(archetype.entity_size());
		let table: TableHandle = Arc::new(RwLock::new(EntityTable::new(archetype.clone(), capacity, self.id)));
		self.publish_table_if_absent(archetype, &table);
		tracing::debug!(capacity, "allocated new entity table");
		table
	}

	fn publish_table_if_absent(&self, archetype: &EntityArchetype, table: &TableHandle) {
		let mut lookup_guard = self.lookup.write();
		let current = lookup_guard.clone();
		let grouping = current.try_get(archetype).cloned().unwrap_or_else(|| EntityGrouping::new(archetype.clone()));

		if grouping.iter().any(|existing| Arc::ptr_eq(existing, table)) {
			return;
		}

		let grouping = grouping.with_table_added(table.clone());
		*lookup_guard = Arc::new(current.with_grouping(archetype, grouping));
	}

	fn remove_table_from_grouping(&self, table: &TableHandle, archetype: &EntityArchetype) {
		let mut lookup_guard = self.lookup.write();
		let current = lookup_guard.clone();
		if let Some(grouping) = current.try_get(archetype) {
			let updated = grouping.with_table_removed(table);
			*lookup_guard = Arc::new(current.with_grouping(archetype, updated));
		}
	}

	fn relocate_to_archetype(
		&self, inner: &mut RegistryInner, idx: usize, record: Record, archetype: &EntityArchetype,
	) -> EcsResult<()> {
		let dst_table = self.find_or_create_destination_table(archetype);
		self.relocate(inner, idx, record, dst_table)
	}

	fn relocate(&self, inner: &mut RegistryInner, idx: usize, record: Record, dst_table: TableHandle) -> EcsResult<()> {
		let src_table = record.table.clone().unwrap();
		let dst_archetype = dst_table.read().archetype().clone();

		let new_index = {
			let src_guard = src_table.read();
			let mut dst_guard = dst_table.write();
			dst_guard.import_row(Entity { index: idx as u32, version: record.version }, &src_guard, record.index as usize)?
		};

		// Managed columns shared with `dst_archetype` were bit-copied into the new row above;
		// their source slot must not be dropped here too, or the destination is left holding a
		// duplicate of a value that's already been freed.
		let moved = src_table.write().remove_at_relocating(record.index as usize, &dst_archetype)?;
		if let Some(moved_entity) = moved {
			inner.records[moved_entity.index() as usize].index = record.index;
		}

		if src_table.read().is_empty() {
			let src_archetype = src_table.read().archetype().clone();
			self.remove_table_from_grouping(&src_table, &src_archetype);
		}

		inner.records[idx] = Record { table: Some(dst_table), index: new_index as u32, version: record.version };
		Ok(())
	}
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}
