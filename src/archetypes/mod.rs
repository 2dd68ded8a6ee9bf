//! An [`EntityArchetype`] is the canonical, ordered set of [components](crate::components::Component)
//! shared by every entity stored in one [table](crate::entities::EntityTable).

mod archetype;

pub use archetype::EntityArchetype;
