use crate::archetypes::EntityArchetype;
use crate::components::ComponentType;
use crate::data_structures::BitField;
use crate::entities::EntityGrouping;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, atomically-replaceable handle to the current [`EntityLookup`] snapshot.
///
/// Reading clones the `Arc` under a brief read lock; publishing swaps in a new `Arc` under a
/// brief write lock. This is the "volatile field" the specification's snapshot-replacement
/// model calls for, built from the same `parking_lot` primitive already used elsewhere in this
/// crate for other shared mutable state.
pub type LookupHandle = Arc<RwLock<Arc<EntityLookup>>>;

/// An immutable snapshot mapping archetype bitsets to the [`EntityGrouping`] of tables storing
/// them, in insertion order.
///
/// Groupings are retained in their slot even once every table inside them has been removed —
/// see the crate's design notes for why `lookup.count()` does not shrink back to zero merely
/// because the registry emptied out.
#[derive(Clone, Default)]
pub struct EntityLookup {
	order: Vec<BitField>,
	groupings: HashMap<BitField, EntityGrouping>,
}

impl EntityLookup {
	/// An empty lookup snapshot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct archetype groupings registered (including emptied-out ones).
	pub fn count(&self) -> usize {
		self.order.len()
	}

	/// The grouping registered at insertion-order position `index`, if any.
	pub fn get_index(&self, index: usize) -> Option<&EntityGrouping> {
		let key = self.order.get(index)?;
		self.groupings.get(key)
	}

	/// The grouping for exactly `archetype`, if one has been registered.
	pub fn try_get(&self, archetype: &EntityArchetype) -> Option<&EntityGrouping> {
		self.groupings.get(archetype.bits())
	}

	/// The grouping keyed by the raw bitset `bits`, if one has been registered.
	pub(crate) fn try_get_by_bits(&self, bits: &BitField) -> Option<&EntityGrouping> {
		self.groupings.get(bits)
	}

	/// The grouping whose archetype is `archetype` plus `ty` (one bit added), if registered.
	pub fn try_get_with(&self, archetype: &EntityArchetype, ty: &ComponentType) -> Option<&EntityGrouping> {
		let mut key = archetype.bits().clone();
		key.set(ty.id().value(), true);
		self.groupings.get(&key)
	}

	/// The grouping whose archetype is `archetype` minus `ty` (one bit removed), if registered.
	pub fn try_get_without(&self, archetype: &EntityArchetype, ty: &ComponentType) -> Option<&EntityGrouping> {
		let mut key = archetype.bits().clone();
		key.set(ty.id().value(), false);
		self.groupings.get(&key)
	}

	/// Publish `grouping` under `archetype`'s key, preserving the slot's insertion index if the
	/// key already exists, appending a new slot otherwise.
	pub(crate) fn with_grouping(&self, archetype: &EntityArchetype, grouping: EntityGrouping) -> Self {
		let key = archetype.bits().clone();
		let mut order = self.order.clone();
		let mut groupings = self.groupings.clone();

		if !groupings.contains_key(&key) {
			order.push(key.clone());
		}
		groupings.insert(key, grouping);

		Self { order, groupings }
	}
}
