//! Eligibility filtering and per-line partitioning of candidates.
//!
//! [`CandidateIndex::build_for`] scans a candidate source exactly once,
//! keeps the candidates whose group is assigned to the sign, and routes
//! each one into a lazily created [`OrderedLineSet`] bucket per output
//! line. The build is one-shot; while a sign-editing session is open,
//! push events from the source are applied incrementally through
//! [`CandidateIndex::apply`].

use std::collections::{BTreeMap, HashSet};

use crate::candidate::{Candidate, GroupId, SignId};
use crate::line_set::{OrderedLineSet, SetChange};

/// Supplies the groups currently assigned to a sign.
///
/// Membership is computed externally (from the sign's assignments);
/// this crate queries it once per index build. A sign that resolves to
/// no groups is not an error, it simply yields an empty filter.
pub trait GroupMembership {
    fn member_groups(&self, sign: &SignId) -> Vec<GroupId>;
}

impl GroupMembership for BTreeMap<SignId, Vec<GroupId>> {
    fn member_groups(&self, sign: &SignId) -> Vec<GroupId> {
        self.get(sign).cloned().unwrap_or_default()
    }
}

/// Pure eligibility predicate over a snapshot of group membership.
#[derive(Debug, Clone)]
pub struct GroupFilter {
    groups: HashSet<GroupId>,
}

impl GroupFilter {
    /// Snapshot the membership of `sign` from the provider.
    pub fn for_sign(provider: &dyn GroupMembership, sign: &SignId) -> Self {
        Self {
            groups: provider.member_groups(sign).into_iter().collect(),
        }
    }

    /// Build a filter from an explicit group set.
    pub fn from_groups(groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// A candidate is eligible iff its group is one of the sign's
    /// groups. Ungrouped candidates are never eligible.
    pub fn is_eligible(&self, candidate: &Candidate) -> bool {
        match &candidate.group {
            Some(group) => self.groups.contains(group),
            None => false,
        }
    }
}

/// Push event from the external candidate source.
#[derive(Debug, Clone)]
pub enum CandidateEvent {
    Added(Candidate),
    Removed(Candidate),
    /// The candidate with this name was edited in place; the payload
    /// carries the post-edit field values.
    Changed(Candidate),
}

/// Eligible candidates partitioned into one [`OrderedLineSet`] per
/// output line.
pub struct CandidateIndex {
    filter: GroupFilter,
    /// One bucket per output line first seen. Buckets are created
    /// lazily and kept for the lifetime of the editing session.
    lines: BTreeMap<u32, OrderedLineSet>,
}

impl std::fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateIndex")
            .field("filter", &self.filter)
            .field("lines", &self.lines)
            .finish()
    }
}

impl CandidateIndex {
    /// Build an index for `sign` from a finite candidate source.
    ///
    /// Iterates the source exactly once. Callers rebuild when the
    /// source or the sign's group membership changes wholesale;
    /// individual source events go through [`apply`](Self::apply).
    pub fn build_for<I>(provider: &dyn GroupMembership, sign: &SignId, source: I) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut index = Self {
            filter: GroupFilter::for_sign(provider, sign),
            lines: BTreeMap::new(),
        };
        for candidate in source {
            index.insert(candidate);
        }
        index
    }

    /// True iff no output-line bucket was ever created, i.e. the source
    /// held no eligible candidate.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The bucket for an output line, if one was created.
    pub fn line(&self, line: u32) -> Option<&OrderedLineSet> {
        self.lines.get(&line)
    }

    /// Mutable access to the bucket for an output line, e.g. for
    /// selection changes or observer registration.
    pub fn line_mut(&mut self, line: u32) -> Option<&mut OrderedLineSet> {
        self.lines.get_mut(&line)
    }

    /// Iterate buckets in output-line order.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &OrderedLineSet)> {
        self.lines.iter().map(|(line, set)| (*line, set))
    }

    /// Apply one push event from the candidate source.
    pub fn apply(&mut self, event: CandidateEvent) -> Option<SetChange> {
        match event {
            CandidateEvent::Added(candidate) => self.insert(candidate),
            CandidateEvent::Removed(candidate) => self.remove(&candidate),
            CandidateEvent::Changed(candidate) => self.change(candidate),
        }
    }

    /// Insert a candidate if it passes the filter.
    fn insert(&mut self, candidate: Candidate) -> Option<SetChange> {
        if !self.filter.is_eligible(&candidate) {
            return None;
        }
        self.get_or_create(candidate.line).add(candidate)
    }

    fn remove(&mut self, candidate: &Candidate) -> Option<SetChange> {
        // The stored copy may carry a stale key if the removal raced an
        // edit, so locate by name rather than by comparator key.
        let line = self.line_of(&candidate.name)?;
        self.lines.get_mut(&line)?.remove_named(&candidate.name)
    }

    /// Route an edit, moving the candidate between buckets when its
    /// output line changed.
    fn change(&mut self, updated: Candidate) -> Option<SetChange> {
        let old_line = match self.line_of(&updated.name) {
            Some(line) => line,
            // Not tracked: treat like an add so that a candidate edited
            // into eligibility shows up.
            None => return self.insert(updated),
        };
        if !self.filter.is_eligible(&updated) {
            // Edited out of eligibility: drop it from its bucket.
            return self.lines.get_mut(&old_line)?.remove_named(&updated.name);
        }
        if old_line == updated.line {
            self.lines.get_mut(&old_line)?.change(updated)
        } else {
            self.lines.get_mut(&old_line)?.remove_named(&updated.name);
            self.get_or_create(updated.line).add(updated)
        }
    }

    /// The output line whose bucket currently tracks `name`.
    fn line_of(&self, name: &str) -> Option<u32> {
        self.lines
            .iter()
            .find(|(_, set)| set.contains_name(name))
            .map(|(line, _)| *line)
    }

    fn get_or_create(&mut self, line: u32) -> &mut OrderedLineSet {
        self.lines.entry(line).or_default()
    }
}
