//! Total order over candidates.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Compare two candidates for display ordering.
///
/// Keys in priority order: output line ascending, rank ascending,
/// content lexicographic, name lexicographic. Since `name` is unique
/// within a candidate source, the order is total: distinct candidates
/// never compare equal.
///
/// Used both for insertion-order maintenance and for binary search when
/// locating a candidate's current position.
pub fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    a.line
        .cmp(&b.line)
        .then_with(|| a.rank.cmp(&b.rank))
        .then_with(|| a.content.cmp(&b.content))
        .then_with(|| a.name.cmp(&b.name))
}
