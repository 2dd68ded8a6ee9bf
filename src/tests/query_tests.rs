use crate::archetypes::EntityArchetype;
use crate::components::ComponentType;
use crate::entities::{EntityFilter, EntityQuery, EntityRegistry};
use crate::tests::{managed_handle, marker, position, rotation, scale};

#[test]
fn query_matches_only_archetypes_passing_the_filter() {
	let registry = EntityRegistry::new();
	let required = position();

	let matching = EntityArchetype::create_from(&[required.clone(), rotation()]);
	let non_matching = EntityArchetype::create_from(&[scale()]);

	registry.create_with_archetype(&matching);
	registry.create_with_archetype(&non_matching);

	let query = EntityQuery::new(registry.lookup_handle(), EntityFilter::builder().require(&[required]).build());

	let tables = query.tables();
	assert_eq!(tables.len(), 1);
	assert_eq!(tables[0].read().archetype(), &matching);
}

#[test]
fn query_sees_tables_added_after_first_enumeration() {
	let registry = EntityRegistry::new();
	let archetype = EntityArchetype::create_from(&[position(), marker()]);
	let query = EntityQuery::new(registry.lookup_handle(), EntityFilter::builder().require(&[position()]).build());

	assert_eq!(query.tables().len(), 0);

	registry.create_with_archetype(&archetype);
	assert_eq!(query.tables().len(), 1);
}

#[test]
fn query_enumerates_every_table_of_every_matching_grouping() {
	let config = crate::config::RegistryConfig { target_table_bytes: 1, min_capacity: 1 };
	let small_registry = EntityRegistry::with_config(config);

	let shared = position();
	let query = EntityQuery::new(small_registry.lookup_handle(), EntityFilter::builder().require(&[shared.clone()]).build());

	// five groupings (distinguished by an extra component), five tables each, forced by a
	// capacity-1 config so every entity lands in its own table — the same shape as a much larger
	// lazy-growth scenario, scaled down for test speed
	for group in 0..5u32 {
		let mut types = vec![shared.clone()];
		types.push(distinguishing_type(group));
		let archetype = EntityArchetype::create_from(&types);
		for _ in 0..5 {
			small_registry.create_with_archetype(&archetype);
		}
	}

	assert_eq!(query.matched_archetype_count(), 5);
	assert_eq!(query.tables().len(), 25);
}

fn distinguishing_type(group: u32) -> ComponentType {
	match group {
		0 => managed_handle(),
		1 => crate::tests::other_managed_handle(),
		2 => rotation(),
		3 => scale(),
		_ => marker(),
	}
}
