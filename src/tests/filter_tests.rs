use crate::archetypes::EntityArchetype;
use crate::entities::EntityFilter;
use crate::tests::{managed_handle, marker, position, position3, rotation, rotation3, scale, scale3};

#[test]
fn matches_checks_require_all_include_any_and_exclude_any() {
	let p3 = position3();
	let r3 = rotation3();
	let s3 = scale3();
	let m4 = managed_handle();
	let tag = marker();
	let p2 = position();
	let r2 = rotation();
	let s2 = scale();
	let m3 = crate::tests::other_managed_handle();

	let filter = EntityFilter::builder()
		.require(&[p3.clone(), r3.clone(), s3.clone(), m4.clone()])
		.include(&[tag.clone()])
		.exclude(&[p2.clone(), r2.clone(), s2.clone(), m3.clone()])
		.build();

	let full_match = EntityArchetype::create_from(&[p3.clone(), r3.clone(), s3.clone(), m4.clone(), tag.clone()]);
	assert!(filter.matches(&full_match));

	let missing_required = EntityArchetype::create_from(&[p3.clone(), r3.clone(), s3.clone(), tag.clone()]);
	assert!(!filter.matches(&missing_required));

	let contains_excluded = EntityArchetype::create_from(&[p3.clone(), r3.clone(), s3.clone(), m4.clone(), m3.clone(), tag.clone()]);
	assert!(!filter.matches(&contains_excluded));

	let wrong_required = EntityArchetype::create_from(&[p2.clone(), r2.clone(), s2.clone(), m3.clone(), tag.clone()]);
	assert!(!filter.matches(&wrong_required));
}

#[test]
fn exclude_any_rejects_archetypes_with_any_excluded_type() {
	let p = position();
	let r = rotation();
	let tag = marker();

	let filter = EntityFilter::builder().require(&[p.clone()]).exclude(&[r.clone()]).build();

	let clean = EntityArchetype::create_from(&[p.clone(), tag.clone()]);
	assert!(filter.matches(&clean));

	let tainted = EntityArchetype::create_from(&[p.clone(), r.clone(), tag.clone()]);
	assert!(!filter.matches(&tainted));
}

#[test]
fn require_any_is_satisfied_by_a_single_member() {
	let p = position();
	let r = rotation();
	let s = scale();

	let filter = EntityFilter::builder().include(&[r.clone(), s.clone()]).build();

	assert!(filter.matches(&EntityArchetype::create_from(&[p.clone(), r.clone()])));
	assert!(filter.matches(&EntityArchetype::create_from(&[p.clone(), s.clone()])));
	assert!(!filter.matches(&EntityArchetype::create_from(&[p.clone()])));
}

#[test]
fn universal_filter_matches_every_archetype() {
	let filter = EntityFilter::universal();
	assert!(filter.matches(&EntityArchetype::base()));
	assert!(filter.matches(&EntityArchetype::create_from(&[position(), marker()])));
}
