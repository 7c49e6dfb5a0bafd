//! Merging highlight candidates
//!
//! Several detectors may flag the same index. The merge keeps one record
//! per index: the most severe, with the earliest candidate winning ties.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::highlight::Highlight;

/// Keep one highlight per index, ordered by ascending index
///
/// Candidates must be supplied in method order; a later candidate replaces
/// an earlier one only when strictly more severe. Applying this twice gives
/// the same result as applying it once.
pub fn deduplicate(candidates: impl IntoIterator<Item = Highlight>) -> Vec<Highlight> {
    let mut best: BTreeMap<usize, Highlight> = BTreeMap::new();
    for candidate in candidates {
        match best.entry(candidate.index) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.severity > slot.get().severity {
                    slot.insert(candidate);
                }
            }
        }
    }
    best.into_values().collect()
}
