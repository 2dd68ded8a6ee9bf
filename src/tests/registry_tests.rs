use crate::archetypes::EntityArchetype;
use crate::entities::EntityRegistry;
use crate::tests::{managed_handle, position, rotation, ManagedHandle, Position2D, Rotation2D};
use std::collections::HashSet;

#[test]
fn create_assigns_dense_indices_starting_at_zero_with_version_zero() {
	let registry = EntityRegistry::new();
	let entities: Vec<_> = (0..10).map(|_| registry.create()).collect();

	let indices: HashSet<u32> = entities.iter().map(|e| e.index()).collect();
	let expected: HashSet<u32> = (0..10u32).collect();
	assert_eq!(indices, expected);
	assert!(entities.iter().all(|e| e.version() == 0));
	assert_eq!(registry.count(), 10);
}

#[test]
fn destroyed_slots_are_recycled_with_an_incremented_version() {
	let registry = EntityRegistry::new();
	let entities: Vec<_> = (0..10).map(|_| registry.create()).collect();

	for &entity in entities.iter().rev() {
		assert!(registry.destroy(entity));
	}
	assert_eq!(registry.count(), 0);

	let recreated: Vec<_> = (0..10).map(|_| registry.create()).collect();
	let recreated_indices: HashSet<u32> = recreated.iter().map(|e| e.index()).collect();
	let original_indices: HashSet<u32> = entities.iter().map(|e| e.index()).collect();

	assert_eq!(recreated_indices, original_indices);
	assert!(recreated.iter().all(|e| e.version() >= 1));
}

#[test]
fn destroy_is_idempotent_and_invalidates_the_handle() {
	let registry = EntityRegistry::new();
	let entity = registry.create();

	assert!(registry.destroy(entity));
	assert!(!registry.contains(entity));
	assert!(registry.find(entity).is_none());
	assert!(!registry.destroy(entity));
}

#[test]
fn transform_preserves_shared_components_and_relocates_the_source_row() {
	let registry = EntityRegistry::new();
	let with_position = EntityArchetype::create_from(&[position()]);
	let entity = registry.create_with_archetype(&with_position);

	registry.set_component(entity, Position2D { x: 3, y: 4 }).unwrap();
	assert!(registry.add_component_value(entity, Rotation2D { degrees: 90 }).unwrap());

	assert_eq!(registry.try_get_component::<Position2D>(entity), Some(Position2D { x: 3, y: 4 }));
	assert_eq!(registry.try_get_component::<Rotation2D>(entity), Some(Rotation2D { degrees: 90 }));

	let (table, _) = registry.find(entity).unwrap();
	assert!(table.read().archetype().contains(&rotation()));
}

#[test]
fn transform_relocates_a_managed_component_without_corrupting_its_value() {
	let registry = EntityRegistry::new();
	let with_handle = EntityArchetype::create_from(&[managed_handle()]);
	let entity = registry.create_with_archetype(&with_handle);

	registry.set_component(entity, ManagedHandle("owned string".to_owned())).unwrap();
	assert!(registry.add_component_value(entity, Rotation2D { degrees: 180 }).unwrap());

	let mut seen = String::new();
	assert!(registry.with_component::<ManagedHandle>(entity, |handle| seen = handle.0.clone()));
	assert_eq!(seen, "owned string");
	assert_eq!(registry.try_get_component::<Rotation2D>(entity), Some(Rotation2D { degrees: 180 }));

	let (table, _) = registry.find(entity).unwrap();
	assert!(table.read().archetype().contains(&rotation()));
}

#[test]
fn removing_a_managed_component_drops_it_and_leaves_the_rest_intact() {
	let registry = EntityRegistry::new();
	let archetype = EntityArchetype::create_from(&[position(), managed_handle()]);
	let entity = registry.create_with_archetype(&archetype);

	registry.set_component(entity, Position2D { x: 7, y: 8 }).unwrap();
	registry.set_component(entity, ManagedHandle("to be dropped".to_owned())).unwrap();

	assert!(registry.remove_component(entity, &managed_handle()).unwrap());
	assert_eq!(registry.try_get_component::<Position2D>(entity), Some(Position2D { x: 7, y: 8 }));

	let (table, _) = registry.find(entity).unwrap();
	assert!(!table.read().archetype().contains(&managed_handle()));
}

#[test]
fn adding_an_already_present_component_is_a_no_op() {
	let registry = EntityRegistry::new();
	let archetype = EntityArchetype::create_from(&[position()]);
	let entity = registry.create_with_archetype(&archetype);

	registry.set_component(entity, Position2D { x: 1, y: 1 }).unwrap();
	assert!(!registry.add_component_value(entity, Position2D { x: 9, y: 9 }).unwrap());
	assert_eq!(registry.try_get_component::<Position2D>(entity), Some(Position2D { x: 1, y: 1 }));
}

#[test]
fn removing_a_component_returns_its_value_and_drops_it_from_the_archetype() {
	let registry = EntityRegistry::new();
	let archetype = EntityArchetype::create_from(&[position(), rotation()]);
	let entity = registry.create_with_archetype(&archetype);
	registry.set_component(entity, Rotation2D { degrees: 45 }).unwrap();

	let removed = registry.remove_component_value::<Rotation2D>(entity).unwrap();
	assert_eq!(removed, Some(Rotation2D { degrees: 45 }));

	let (table, _) = registry.find(entity).unwrap();
	assert!(!table.read().archetype().contains(&rotation()));
	assert_eq!(registry.try_get_component::<Rotation2D>(entity), None);
}

#[test]
fn find_resolves_to_the_row_actually_holding_the_entity() {
	let registry = EntityRegistry::new();
	let archetype = EntityArchetype::create_from(&[position()]);
	let entities: Vec<_> = (0..4).map(|_| registry.create_with_archetype(&archetype)).collect();

	for &entity in &entities {
		let (table, index) = registry.find(entity).unwrap();
		assert_eq!(table.read().get_entities()[index], entity);
	}
}

#[test]
fn registry_count_matches_the_sum_of_table_counts() {
	let registry = EntityRegistry::new();
	let a = EntityArchetype::create_from(&[position()]);
	let b = EntityArchetype::create_from(&[rotation()]);

	for _ in 0..6 {
		registry.create_with_archetype(&a);
	}
	for _ in 0..3 {
		registry.create_with_archetype(&b);
	}
	let doomed = registry.create_with_archetype(&a);
	registry.destroy(doomed);

	assert_eq!(registry.count(), 9);
}
