use crate::archetypes::EntityArchetype;
use crate::components::ComponentType;
use crate::data_structures::BitField;

/// A declarative predicate over archetypes: `require_all ⊆ archetype`, `require_any` bitset
/// intersects the archetype (or is empty), and `exclude_any` does not intersect the archetype.
#[derive(Clone, Default)]
pub struct EntityFilter {
	require_all: BitField,
	require_any: BitField,
	exclude_any: BitField,
}

impl EntityFilter {
	/// The filter matching every archetype.
	pub fn universal() -> Self {
		Self::default()
	}

	/// Start building a filter.
	pub fn builder() -> EntityFilterBuilder {
		EntityFilterBuilder::default()
	}

	/// Whether `archetype` satisfies this filter's require-all, require-any, and exclude-any bitsets.
	pub fn matches(&self, archetype: &EntityArchetype) -> bool {
		let bits = archetype.bits();
		if !self.require_all.is_subset_of(bits) {
			return false;
		}
		if !self.require_any.is_empty() && !self.require_any.intersects(bits) {
			return false;
		}
		if self.exclude_any.intersects(bits) {
			return false;
		}
		true
	}
}

/// Builder for [`EntityFilter`].
#[derive(Default)]
pub struct EntityFilterBuilder {
	require_all: BitField,
	require_any: BitField,
	exclude_any: BitField,
}

impl EntityFilterBuilder {
	/// Every listed type must be present.
	pub fn require(mut self, types: &[ComponentType]) -> Self {
		for ty in types {
			self.require_all.set(ty.id().value(), true);
		}
		self
	}

	/// At least one listed type must be present (no-op constraint if `types` is empty).
	pub fn include(mut self, types: &[ComponentType]) -> Self {
		for ty in types {
			self.require_any.set(ty.id().value(), true);
		}
		self
	}

	/// None of the listed types may be present.
	pub fn exclude(mut self, types: &[ComponentType]) -> Self {
		for ty in types {
			self.exclude_any.set(ty.id().value(), true);
		}
		self
	}

	/// Finalize the filter.
	pub fn build(self) -> EntityFilter {
		EntityFilter {
			require_all: self.require_all,
			require_any: self.require_any,
			exclude_any: self.exclude_any,
		}
	}
}
