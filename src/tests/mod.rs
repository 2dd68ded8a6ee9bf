mod filter_tests;
mod query_tests;
mod registry_tests;

use crate::components::ComponentType;

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Position2D {
	pub x: i32,
	pub y: i32,
}

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Rotation2D {
	pub degrees: i32,
}

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Scale2D {
	pub x: i32,
	pub y: i32,
}

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Marker;

#[derive(Default, Clone, PartialEq, Debug)]
pub(crate) struct ManagedHandle(pub String);

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Position3D {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Rotation3D {
	pub degrees: i32,
}

#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub(crate) struct Scale3D {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

#[derive(Default, Clone, PartialEq, Debug)]
pub(crate) struct OtherManagedHandle(pub String);

pub(crate) fn position() -> ComponentType {
	ComponentType::of::<Position2D>()
}
pub(crate) fn rotation() -> ComponentType {
	ComponentType::of::<Rotation2D>()
}
pub(crate) fn scale() -> ComponentType {
	ComponentType::of::<Scale2D>()
}
pub(crate) fn marker() -> ComponentType {
	ComponentType::of::<Marker>()
}
pub(crate) fn managed_handle() -> ComponentType {
	ComponentType::of::<ManagedHandle>()
}
pub(crate) fn position3() -> ComponentType {
	ComponentType::of::<Position3D>()
}
pub(crate) fn rotation3() -> ComponentType {
	ComponentType::of::<Rotation3D>()
}
pub(crate) fn scale3() -> ComponentType {
	ComponentType::of::<Scale3D>()
}
pub(crate) fn other_managed_handle() -> ComponentType {
	ComponentType::of::<OtherManagedHandle>()
}
