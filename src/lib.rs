#![warn(missing_docs)]

//! A columnar, archetype-based entity-component store.
//!
//! Entities are grouped into [tables](entities::EntityTable) by the exact set of component types
//! they carry (their [archetype](archetypes::EntityArchetype)); each table stores its components
//! as parallel, contiguous columns rather than one struct-per-entity, so iterating a query is a
//! straight-line scan rather than a chase of pointers.
//!
//! # Getting started
//! ```
//! use ecs_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Position { x: f32, y: f32 }
//! #[derive(Default)]
//! struct Velocity { x: f32, y: f32 }
//!
//! let registry = EntityRegistry::new();
//! let entity = registry.create();
//! registry.add_component_value(entity, Position { x: 0.0, y: 0.0 }).unwrap();
//! registry.add_component_value(entity, Velocity { x: 1.0, y: 0.0 }).unwrap();
//!
//! let query = EntityQuery::new(
//!     registry.lookup_handle(),
//!     EntityFilter::builder().require(&[ComponentType::of::<Position>(), ComponentType::of::<Velocity>()]).build(),
//! );
//! for table in query.tables() {
//!     let table = table.read();
//!     assert_eq!(table.count(), 1);
//! }
//! ```
//!
//! ## Components
//! Any `Default + Send + Sync + 'static` type is a [component](components::Component); no derive
//! or registration step is required. See [components] for how types are categorized into tags,
//! unmanaged (bit-copyable), and managed (drop-requiring) storage.
//!
//! ## Entities
//! An [Entity](entities::Entity) is an opaque `(index, version)` handle resolved against an
//! [EntityRegistry](entities::EntityRegistry). See [entities].
//!
//! ## Archetypes
//! An [EntityArchetype](archetypes::EntityArchetype) is the canonical, ordered set of component
//! types shared by every row of one table. See [archetypes].
//!
//! ## Queries
//! An [EntityFilter](entities::EntityFilter) declares which archetypes are of interest; an
//! [EntityQuery](entities::EntityQuery) binds a filter to a registry's lookup and enumerates the
//! matching tables. See [entities].

pub mod archetypes;
pub mod components;
pub mod config;
pub mod data_structures;
pub mod entities;
pub mod error;

pub mod prelude {
	//! All essential types used by this crate.
	pub use crate::archetypes::EntityArchetype;
	pub use crate::components::{Component, ComponentCategory, ComponentType};
	pub use crate::config::RegistryConfig;
	pub use crate::entities::{Entity, EntityFilter, EntityFilterBuilder, EntityQuery, EntityRegistry, EntityTable};
	pub use crate::error::{EcsError, EcsResult};
}

#[cfg(test)]
mod tests;
