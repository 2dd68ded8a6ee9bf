use crate::components::{ComponentCategory, ComponentType};
use crate::data_structures::BitField;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Size, in bytes, of the entity identifier every table row carries alongside its components.
/// Mirrors the layout of [`Entity`](crate::entities::Entity); kept local to avoid a dependency
/// cycle between the archetype and entity modules.
const ENTITY_ID_SIZE: usize = 8;

fn category_rank(category: ComponentCategory) -> u8 {
	match category {
		ComponentCategory::Managed => 0,
		ComponentCategory::Unmanaged => 1,
		ComponentCategory::Tag => 2,
	}
}

/// The immutable, canonical set of components shared by every entity in one table.
///
/// Construction sorts the component list into managed-first, unmanaged-second, tag-last order
/// (each group ascending by id), drops duplicates, and discards nulls — so two calls to
/// [`EntityArchetype::create`] with the same multiset of types, in any order, with any number
/// of repeats or `None` entries, produce archetypes that compare equal.
#[derive(Clone, Debug)]
pub struct EntityArchetype {
	component_types: Arc<[ComponentType]>,
	component_bits: BitField,
	managed_count: usize,
	unmanaged_count: usize,
	tag_count: usize,
	entity_size: usize,
}

impl EntityArchetype {
	/// Build the canonical archetype for `types`, discarding `None` entries and duplicates.
	pub fn create(types: &[Option<ComponentType>]) -> Self {
		let mut list: Vec<ComponentType> = types.iter().filter_map(|t| t.clone()).collect();
		list.sort_by(|a, b| category_rank(a.category()).cmp(&category_rank(b.category())).then(a.id().cmp(&b.id())));
		list.dedup_by(|a, b| a.id() == b.id());

		let mut component_bits = BitField::new();
		let mut entity_size = ENTITY_ID_SIZE;
		let mut managed_count = 0;
		let mut unmanaged_count = 0;
		let mut tag_count = 0;

		for ty in &list {
			component_bits.set(ty.id().value(), true);
			entity_size += ty.size();
			match ty.category() {
				ComponentCategory::Managed => managed_count += 1,
				ComponentCategory::Unmanaged => unmanaged_count += 1,
				ComponentCategory::Tag => tag_count += 1,
			}
		}

		Self {
			component_types: Arc::from(list),
			component_bits,
			managed_count,
			unmanaged_count,
			tag_count,
			entity_size,
		}
	}

	/// Build a canonical archetype from a slice with no null entries.
	pub fn create_from(types: &[ComponentType]) -> Self {
		Self::create(&types.iter().cloned().map(Some).collect::<Vec<_>>())
	}

	/// The archetype with no components.
	pub fn base() -> Self {
		Self::create(&[])
	}

	/// The component types of this archetype, in managed/unmanaged/tag, id-ascending order.
	pub fn component_types(&self) -> &[ComponentType] {
		&self.component_types
	}

	/// Component types that have a storage column (managed or unmanaged; excludes tags), in order.
	pub fn stored_types(&self) -> impl Iterator<Item = &ComponentType> {
		self.component_types.iter().filter(|t| !t.is_tag())
	}

	/// Number of leading components requiring drop-on-removal.
	pub const fn managed_count(&self) -> usize {
		self.managed_count
	}

	/// Number of components with a plain, bit-copyable column.
	pub const fn unmanaged_count(&self) -> usize {
		self.unmanaged_count
	}

	/// Number of zero-size, storage-less components.
	pub const fn tag_count(&self) -> usize {
		self.tag_count
	}

	/// Size, in bytes, of one row: the entity id plus every component's size.
	pub const fn entity_size(&self) -> usize {
		self.entity_size
	}

	/// The canonical bitset of this archetype's component ids.
	pub(crate) fn bits(&self) -> &BitField {
		&self.component_bits
	}

	/// Whether `ty` is a member of this archetype.
	pub fn contains(&self, ty: &ComponentType) -> bool {
		self.component_bits.get(ty.id().value())
	}

	/// The archetype resulting from adding `ty` (idempotent if already present).
	pub fn add(&self, ty: ComponentType) -> Self {
		if self.contains(&ty) {
			return self.clone();
		}
		let mut types: Vec<Option<ComponentType>> = self.component_types.iter().cloned().map(Some).collect();
		types.push(Some(ty));
		Self::create(&types)
	}

	/// The archetype resulting from removing `ty` (idempotent if already absent).
	pub fn remove(&self, ty: &ComponentType) -> Self {
		if !self.contains(ty) {
			return self.clone();
		}
		let types: Vec<Option<ComponentType>> =
			self.component_types.iter().filter(|t| t.id() != ty.id()).cloned().map(Some).collect();
		Self::create(&types)
	}
}

impl Eq for EntityArchetype {}

impl PartialEq for EntityArchetype {
	fn eq(&self, other: &Self) -> bool {
		self.component_bits == other.component_bits
	}
}

impl Hash for EntityArchetype {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.component_bits.hash(state);
	}
}
