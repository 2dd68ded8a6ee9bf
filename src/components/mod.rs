//! [Components](Component) are pieces of data associated with one or more
//! [entities](crate::entities::Entity).
//!
//! Any `Default + Send + Sync + 'static` type is a valid [`Component`]; no derive is required.
//! Each distinct Rust type is assigned a unique [`ComponentId`] the first time
//! [`ComponentType::of`] observes it. Developers shouldn't rely on those ids being stable
//! between program re-runs.
//!
//! [Components](Component) are stored in contiguous, column-major buffers managed by an
//! [`EntityTable`](crate::entities::EntityTable). Adding or removing a component from an entity
//! moves every one of that entity's other components to a new table, so structural changes
//! should be kept to a minimum relative to in-place value updates.

mod component_id;
mod component_type;

pub use component_type::{Component, ComponentCategory, ComponentType};
pub(crate) use component_id::ComponentId;
