//! A unique runtime identifier tied to a registered component type.
//!
//! Developers shouldn't rely on [component ids](ComponentId) being stable between program
//! re-runs. [Component ids](ComponentId) are generally used for populating the various
//! [bitfields](crate::data_structures::BitField) used by
//! [archetypes](crate::archetypes::EntityArchetype) and
//! [filters](crate::entities::EntityFilter).

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::HashMap;

/// A process-wide, densely assigned identifier for a registered component type.
///
/// Ids start at 0 and are handed out in first-use order; the same Rust type always receives
/// the same id for the lifetime of the process.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: u32,
}

impl ComponentId {
	#[inline(always)]
	pub(crate) const fn value(&self) -> usize {
		self.value as usize
	}

	#[inline(always)]
	pub(crate) const fn from_raw(value: u32) -> Self {
		Self { value }
	}
}

struct TypeRegistry {
	ids: HashMap<TypeId, ComponentId>,
	next: u32,
}

static TYPE_REGISTRY: Lazy<Mutex<TypeRegistry>> = Lazy::new(|| {
	Mutex::new(TypeRegistry {
		ids: HashMap::new(),
		next: 0,
	})
});

/// Returns the stable [`ComponentId`] for `T`, assigning a fresh one on first call.
pub(crate) fn id_of<T: 'static>() -> ComponentId {
	let key = TypeId::of::<T>();
	let mut registry = TYPE_REGISTRY.lock();
	if let Some(id) = registry.ids.get(&key) {
		return *id;
	}

	let value = registry.next;
	registry.next += 1;
	debug_assert!(value <= u32::MAX, "This is an insane number of components. Please seek help.");

	let id = ComponentId::from_raw(value);
	registry.ids.insert(key, id);
	id
}
