use crate::data_structures::BitField;
use crate::entities::grouping::TableHandle;
use crate::entities::{EntityFilter, LookupHandle};
use parking_lot::Mutex;

struct QueryState {
	cursor: usize,
	cache: Vec<BitField>,
}

/// A filter bound to a lookup, with an incrementally grown cache of matching archetype keys.
///
/// The cache stores archetype keys rather than frozen [`EntityGrouping`](crate::entities::EntityGrouping)
/// values, so a grouping that gains tables after it was first matched is re-read from whatever
/// lookup snapshot is current when the query is next enumerated — tables added later to an
/// already-matched archetype become visible automatically. Stale keys whose grouping has since
/// emptied out are retained (not compacted) so cursor arithmetic stays stable.
pub struct EntityQuery {
	lookup: LookupHandle,
	filter: EntityFilter,
	state: Mutex<QueryState>,
}

impl EntityQuery {
	/// Bind `filter` to `lookup`. Nothing is matched until the query is first enumerated.
	pub fn new(lookup: LookupHandle, filter: EntityFilter) -> Self {
		Self {
			lookup,
			filter,
			state: Mutex::new(QueryState { cursor: 0, cache: Vec::new() }),
		}
	}

	fn refresh(&self) {
		let snapshot = self.lookup.read().clone();
		let mut state = self.state.lock();
		while state.cursor < snapshot.count() {
			if let Some(grouping) = snapshot.get_index(state.cursor) {
				if self.filter.matches(grouping.key()) {
					state.cache.push(grouping.key().bits().clone());
				}
			}
			state.cursor += 1;
		}
	}

	/// Every table, across every matching grouping, as of the most recent lookup snapshot.
	pub fn tables(&self) -> Vec<TableHandle> {
		self.refresh();

		let snapshot = self.lookup.read().clone();
		let state = self.state.lock();

		let mut result = Vec::new();
		for key in state.cache.iter() {
			if let Some(grouping) = snapshot.try_get_by_bits(key) {
				result.extend(grouping.iter().cloned());
			}
		}
		result
	}

	/// Number of archetype keys currently cached as matching (including emptied-out ones).
	pub fn matched_archetype_count(&self) -> usize {
		self.refresh();
		self.state.lock().cache.len()
	}
}
