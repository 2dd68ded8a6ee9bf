use crate::components::component_id::{id_of, ComponentId};
use crate::data_structures::AnyBuffer;
use std::any::TypeId;
use std::hash::{Hash, Hasher};
use std::mem::{needs_drop, size_of};

/// Marker trait for anything that can be stored as a component.
///
/// Implemented for every `Default + Send + Sync + 'static` type: there is nothing to derive,
/// a type becomes a valid component simply by satisfying these bounds. `Default` is required
/// because unmanaged columns are zero-initialized on row insertion and managed columns are
/// reset to their default (rather than dropped and left uninitialized) when a row is removed.
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

/// Which storage discipline a [`ComponentType`] needs.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ComponentCategory {
	/// Zero-sized; carries no per-row data and has no storage column.
	Tag,
	/// Bit-copyable; no destructor needs to run when a row is removed.
	Unmanaged,
	/// Owns a resource (has drop glue); the vacated slot must be dropped and reset on removal.
	Managed,
}

/// A runtime representation of a type implementing [`Component`].
///
/// Two [`ComponentType`] values compare equal iff their ids are equal; ids are dense, assigned
/// in first-use order, starting at 0.
#[derive(Clone, Debug)]
pub struct ComponentType {
	id: ComponentId,
	type_id: TypeId,
	size: usize,
	category: ComponentCategory,
	make_buffer: Option<fn(usize) -> AnyBuffer>,
}

impl ComponentType {
	/// Returns the [`ComponentType`] of `T`, registering it on first call.
	pub fn of<T: Component>() -> Self {
		let size = size_of::<T>();
		let category = if size == 0 {
			ComponentCategory::Tag
		} else if needs_drop::<T>() {
			ComponentCategory::Managed
		} else {
			ComponentCategory::Unmanaged
		};

		let make_buffer = match category {
			ComponentCategory::Tag => None,
			_ => Some(AnyBuffer::with_capacity_default::<T> as fn(usize) -> AnyBuffer),
		};

		Self {
			id: id_of::<T>(),
			type_id: TypeId::of::<T>(),
			size,
			category,
			make_buffer,
		}
	}

	/// The process-unique, dense id of this component type.
	pub const fn id(&self) -> ComponentId {
		self.id
	}

	pub(crate) const fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// The byte size of one instance of this component (0 for tags).
	pub const fn size(&self) -> usize {
		self.size
	}

	/// The storage discipline this component requires.
	pub const fn category(&self) -> ComponentCategory {
		self.category
	}

	/// Whether this type needs no storage column (see [`ComponentCategory::Tag`]).
	pub const fn is_tag(&self) -> bool {
		matches!(self.category, ComponentCategory::Tag)
	}

	pub(crate) fn create_buffer(&self, capacity: usize) -> Option<AnyBuffer> {
		self.make_buffer.map(|make| make(capacity))
	}
}

impl Eq for ComponentType {}

impl PartialEq<Self> for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Hash for ComponentType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

impl Ord for ComponentType {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.id.cmp(&other.id)
	}
}

impl PartialOrd for ComponentType {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}
