//! Candidate value type and identifiers.
//!
//! A [`Candidate`] is a single selectable text fragment usable on one
//! output line of a sign message. Candidates are supplied by an external
//! cache layer; this crate only orders, filters, and displays them.

use std::fmt;

/// Lowest allowed rank (highest priority).
pub const RANK_MIN: u8 = 1;
/// Highest allowed rank (lowest priority).
pub const RANK_MAX: u8 = 99;

/// Opaque handle for a candidate group.
///
/// Groups are defined and assigned externally; this crate only compares
/// handles for membership checks.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identifier of a programmable sign.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SignId(pub String);

impl SignId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A selectable text fragment for one output line of a message.
///
/// Identity (equality and hashing) is by `name` only, which is unique
/// across a candidate source. Ordering is a separate concern, see
/// [`candidate_order`](crate::candidate_order).
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    /// Display text, possibly containing formatting markup.
    pub content: String,
    /// Target output line on the sign. 0 means unassigned.
    pub line: u32,
    /// Priority in `[RANK_MIN, RANK_MAX]`; lower sorts first.
    pub rank: u8,
    /// Unique identifier within the candidate source.
    pub name: String,
    /// Group this candidate belongs to, if any.
    pub group: Option<GroupId>,
}

impl Candidate {
    /// Create a candidate, clamping `rank` into `[RANK_MIN, RANK_MAX]`.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        line: u32,
        rank: u8,
        group: Option<GroupId>,
    ) -> Self {
        Self {
            content: content.into(),
            line,
            rank: rank.clamp(RANK_MIN, RANK_MAX),
            name: name.into(),
            group,
        }
    }

    /// Returns true if this candidate belongs to the given group.
    pub fn in_group(&self, group: &GroupId) -> bool {
        self.group.as_ref() == Some(group)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Candidate {}

impl std::hash::Hash for Candidate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Candidate(name, line: 1, rank: 05)
        write!(
            f,
            "Candidate({}, line: {}, rank: {:02})",
            self.name, self.line, self.rank
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_clamping() {
        let high = Candidate::new("a", "TEXT", 1, 200, None);
        assert_eq!(high.rank, RANK_MAX);

        let low = Candidate::new("b", "TEXT", 1, 0, None);
        assert_eq!(low.rank, RANK_MIN);

        let mid = Candidate::new("c", "TEXT", 1, 50, None);
        assert_eq!(mid.rank, 50);
    }

    #[test]
    fn test_identity_is_by_name() {
        let a = Candidate::new("same", "ROAD WORK", 1, 5, None);
        let b = Candidate::new("same", "DIFFERENT TEXT", 2, 99, Some(GroupId::new("g")));
        let c = Candidate::new("other", "ROAD WORK", 1, 5, None);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_in_group() {
        let g1 = GroupId::new("g1");
        let g2 = GroupId::new("g2");
        let c = Candidate::new("a", "TEXT", 1, 5, Some(g1.clone()));

        assert!(c.in_group(&g1));
        assert!(!c.in_group(&g2));

        let ungrouped = Candidate::new("b", "TEXT", 1, 5, None);
        assert!(!ungrouped.in_group(&g1));
    }

    #[test]
    fn test_debug_format() {
        let c = Candidate::new("exit_closed", "EXIT CLOSED", 2, 7, None);
        assert_eq!(
            format!("{:?}", c),
            "Candidate(exit_closed, line: 2, rank: 07)"
        );
    }
}
