use crate::archetypes::EntityArchetype;
use crate::components::{Component, ComponentType};
use crate::data_structures::AnyBuffer;
use crate::entities::Entity;
use crate::error::{EcsError, EcsResult};
use std::any::TypeId;

/// Opaque identifier for the [`EntityRegistry`](crate::entities::EntityRegistry) that owns a table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct RegistryId(pub(crate) u64);

/// A fixed-capacity, column-major store of entities sharing one [`EntityArchetype`].
///
/// Mutating methods are only reachable through the `&mut EntityTable` borrow the owning
/// [`EntityRegistry`] produces while its lock is held; an externally supplied table handle is
/// additionally checked against [`owner`](EntityTable::owner) so a foreign registry cannot write
/// through it.
pub struct EntityTable {
	archetype: EntityArchetype,
	owner: RegistryId,
	capacity: usize,
	version: u64,
	entities: Vec<Entity>,
	columns: Vec<AnyBuffer>,
}

impl EntityTable {
	pub(crate) fn new(archetype: EntityArchetype, capacity: usize, owner: RegistryId) -> Self {
		let columns = archetype
			.stored_types()
			.map(|ty| ty.create_buffer(capacity).expect("stored component type must have a column"))
			.collect();

		Self {
			archetype,
			owner,
			capacity,
			version: 0,
			entities: Vec::with_capacity(capacity),
			columns,
		}
	}

	/// The archetype shared by every row in this table.
	pub fn archetype(&self) -> &EntityArchetype {
		&self.archetype
	}

	/// Number of populated rows.
	pub fn count(&self) -> usize {
		self.entities.len()
	}

	/// Maximum number of rows this table can ever hold.
	pub const fn capacity(&self) -> usize {
		self.capacity
	}

	/// Whether the table has no free rows.
	pub fn is_full(&self) -> bool {
		self.entities.len() == self.capacity
	}

	/// Whether the table holds no rows.
	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Monotonic counter incremented on every structural mutation of this table.
	pub const fn version(&self) -> u64 {
		self.version
	}

	pub(crate) const fn owner(&self) -> RegistryId {
		self.owner
	}

	/// Entity identifiers for rows `[0, count)`, in table order.
	pub fn get_entities(&self) -> &[Entity] {
		&self.entities
	}

	fn column_index_of(&self, type_id: TypeId) -> Option<usize> {
		self.archetype.stored_types().position(|ty| ty.type_id() == type_id)
	}

	/// Read-only view of the column storing `T`, or `ComponentTypeMissing` if `T` is absent or a tag.
	pub fn get_components<T: Component>(&self) -> EcsResult<&[T]> {
		let index = self.column_index_of(TypeId::of::<T>()).ok_or(EcsError::ComponentTypeMissing)?;
		// SAFETY: every populated row's slot in this column was written by `add`/`copy_row_from`.
		let slice = unsafe { self.columns[index].as_slice_unchecked::<T>() };
		Ok(&slice[..self.entities.len()])
	}

	/// Non-throwing variant of [`get_components`](Self::get_components).
	pub fn try_get_components<T: Component>(&self) -> Option<&[T]> {
		self.get_components::<T>().ok()
	}

	/// Mutable view of the column storing `T`, or `ComponentTypeMissing` if `T` is absent or a tag.
	pub fn get_components_mut<T: Component>(&mut self) -> EcsResult<&mut [T]> {
		let index = self.column_index_of(TypeId::of::<T>()).ok_or(EcsError::ComponentTypeMissing)?;
		let count = self.entities.len();
		let slice = unsafe { self.columns[index].as_mut_slice_unchecked::<T>() };
		Ok(&mut slice[..count])
	}

	/// Append `entity` as a new row, default-initializing every component column.
	///
	/// Fails with [`EcsError::TableFull`] if the table is already at capacity.
	pub(crate) fn add(&mut self, entity: Entity) -> EcsResult<usize> {
		if self.is_full() {
			return Err(EcsError::TableFull);
		}
		let index = self.entities.len();
		for column in self.columns.iter_mut() {
			unsafe { column.default_values(index..index + 1) };
		}
		self.entities.push(entity);
		self.version += 1;
		Ok(index)
	}

	/// Remove row `index` via swap-remove, dropping managed columns at the vacated slot.
	///
	/// Returns the entity that was moved into `index` from the end of the table, if any.
	pub(crate) fn remove_at(&mut self, index: usize) -> EcsResult<Option<Entity>> {
		self.remove_row(index, None)
	}

	/// Remove row `index` as part of a relocation into `destination`.
	///
	/// Managed columns that `destination` also stores are left undropped here: their bytes were
	/// already bit-copied into the destination row by [`copy_row_from`](Self::copy_row_from), and
	/// ownership of whatever they point to transfers there instead of being freed at the source.
	/// Managed columns absent from `destination` (a component genuinely being removed) are dropped
	/// as normal, since nothing else ends up owning them.
	///
	/// Returns the entity that was moved into `index` from the end of the table, if any.
	pub(crate) fn remove_at_relocating(&mut self, index: usize, destination: &EntityArchetype) -> EcsResult<Option<Entity>> {
		self.remove_row(index, Some(destination))
	}

	fn remove_row(&mut self, index: usize, keep: Option<&EntityArchetype>) -> EcsResult<Option<Entity>> {
		if index >= self.entities.len() {
			return Err(EcsError::OutOfRange);
		}

		let last = self.entities.len() - 1;
		let managed = self.archetype.managed_count();
		let managed_types: Vec<ComponentType> = self.archetype.component_types()[..managed].to_vec();
		let preserved = |ty: &ComponentType| keep.map_or(false, |dst| dst.contains(ty));

		for (col_index, ty) in managed_types.iter().enumerate() {
			if !preserved(ty) {
				unsafe { self.columns[col_index].drop_values(index..index + 1) };
			}
		}

		self.entities.swap_remove(index);
		let moved = if index != last {
			for column in self.columns.iter_mut() {
				unsafe { column.move_within(last, index) };
			}
			for column in self.columns[..managed].iter_mut() {
				unsafe { column.default_values(last..last + 1) };
			}
			Some(self.entities[index])
		} else {
			for (col_index, ty) in managed_types.iter().enumerate() {
				if preserved(ty) {
					unsafe { self.columns[col_index].default_values(index..index + 1) };
				}
			}
			None
		};

		self.version += 1;
		Ok(moved)
	}

	/// Write `value` into column `T` at row `index`.
	pub(crate) fn set_component<T: Component>(&mut self, index: usize, value: T) -> EcsResult<()> {
		let slice = self.get_components_mut::<T>()?;
		if index >= slice.len() {
			return Err(EcsError::OutOfRange);
		}
		slice[index] = value;
		self.version += 1;
		Ok(())
	}

	/// Copy row `src_index` of `src` into row `dst_index` of `self`, applying §4.3's merge:
	/// columns `self` shares with `src` are bit-copied, columns unique to `self` are
	/// default-initialized. `self` and `src` may have different archetypes.
	pub(crate) fn copy_row_from(&mut self, dst_index: usize, src: &EntityTable, src_index: usize) {
		debug_assert!(dst_index < self.capacity);
		debug_assert!(src_index < src.entities.len());

		let dst_types: Vec<ComponentType> = self.archetype.stored_types().cloned().collect();
		for (dst_col_index, ty) in dst_types.iter().enumerate() {
			match src.column_index_of(ty.type_id()) {
				Some(src_col_index) => unsafe {
					src.columns[src_col_index].copy_values(&mut self.columns[dst_col_index], src_index..src_index + 1, dst_index);
				},
				None => unsafe {
					self.columns[dst_col_index].default_values(dst_index..dst_index + 1);
				},
			}
		}
	}

	/// Insert `entity` as a new row whose component columns are populated from `src`'s row
	/// `src_index` via [`copy_row_from`](Self::copy_row_from).
	pub(crate) fn import_row(&mut self, entity: Entity, src: &EntityTable, src_index: usize) -> EcsResult<usize> {
		if self.is_full() {
			return Err(EcsError::TableFull);
		}
		let index = self.entities.len();
		self.copy_row_from(index, src, src_index);
		self.entities.push(entity);
		self.version += 1;
		Ok(index)
	}
}
