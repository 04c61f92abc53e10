//! Per-output-line sorted candidate container with change notification.
//!
//! [`OrderedLineSet`] keeps the candidates of one output line in
//! comparator order and reports every mutation as a minimal-range
//! [`SetChange`] so that table views can refresh exactly the rows that
//! moved. Notifications are synchronous, in-order callbacks fired by the
//! mutating call itself; there is no queuing or batching.
//!
//! ## Design
//!
//! The container is an explicit sorted `Vec` paired with a name set for
//! identity, rather than an ordered-set type keyed on the comparator.
//! Because the comparator's final key is the unique candidate name
//! (see [`candidate_order`]), two distinct candidates never compare
//! equal; the "already present" branch of [`add`](OrderedLineSet::add)
//! only fires on a true re-insert, making `add` idempotent.

use std::collections::HashSet;
use std::fmt;

use crate::candidate::Candidate;
use crate::order::candidate_order;

/// A minimal-range change to an [`OrderedLineSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetChange {
    /// One element was inserted at this index.
    Inserted(usize),
    /// One element was removed from this index.
    Removed(usize),
    /// Elements in the inclusive index range `[from, to]` changed.
    ///
    /// Emitted by [`OrderedLineSet::change`]; the range covers both the
    /// vacated and the newly occupied position of the edited candidate.
    Changed { from: usize, to: usize },
}

/// Callback sink for view components tracking an [`OrderedLineSet`].
///
/// Callbacks fire synchronously from within the mutating operation, on
/// the caller's thread.
pub trait LineSetObserver {
    /// A candidate was inserted at `index`.
    fn inserted(&mut self, index: usize);
    /// The candidate at `index` was removed.
    fn removed(&mut self, index: usize);
    /// Candidates in the inclusive range `[from, to]` changed.
    fn changed(&mut self, from: usize, to: usize);
}

/// Sorted candidate container for one output line.
#[derive(Default)]
pub struct OrderedLineSet {
    /// Always in strictly increasing comparator order.
    entries: Vec<Candidate>,
    /// Names of all tracked candidates.
    names: HashSet<String>,
    /// Name of the selected candidate, if any.
    selected: Option<String>,
    observers: Vec<Box<dyn LineSetObserver>>,
}

impl fmt::Debug for OrderedLineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedLineSet")
            .field("entries", &self.entries)
            .field("selected", &self.selected)
            .finish()
    }
}

impl OrderedLineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for subsequent change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn LineSetObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, change: SetChange) {
        for observer in self.observers.iter_mut() {
            match change {
                SetChange::Inserted(index) => observer.inserted(index),
                SetChange::Removed(index) => observer.removed(index),
                SetChange::Changed { from, to } => observer.changed(from, to),
            }
        }
    }

    /// Insert a candidate, maintaining sort order.
    ///
    /// Returns the emitted change, or `None` if the candidate was
    /// already present (same name or equal comparator key): re-inserts
    /// are silently dropped. In-place edits go through
    /// [`change`](Self::change) instead.
    pub fn add(&mut self, candidate: Candidate) -> Option<SetChange> {
        if self.names.contains(&candidate.name) {
            return None;
        }
        match self
            .entries
            .binary_search_by(|e| candidate_order(e, &candidate))
        {
            Ok(_) => None,
            Err(index) => {
                self.names.insert(candidate.name.clone());
                self.entries.insert(index, candidate);
                let change = SetChange::Inserted(index);
                self.notify(change);
                Some(change)
            }
        }
    }

    /// Remove a candidate, located by comparator key.
    ///
    /// Absent candidates are silently ignored (no notification). If the
    /// removed candidate was selected, the selection is cleared.
    pub fn remove(&mut self, candidate: &Candidate) -> Option<SetChange> {
        match self
            .entries
            .binary_search_by(|e| candidate_order(e, candidate))
        {
            Err(_) => None,
            Ok(index) => Some(self.remove_at(index)),
        }
    }

    /// Remove the candidate with the given name, wherever it sorts.
    ///
    /// Used when the stored copy's sort key is already stale (e.g. the
    /// candidate was edited before the removal was routed here).
    pub fn remove_named(&mut self, name: &str) -> Option<SetChange> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> SetChange {
        let removed = self.entries.remove(index);
        self.names.remove(&removed.name);
        if self.selected.as_deref() == Some(removed.name.as_str()) {
            self.selected = None;
        }
        let change = SetChange::Removed(index);
        self.notify(change);
        change
    }

    /// Re-sort a tracked candidate after an in-place edit.
    ///
    /// The old position is located by name (the stored copy still
    /// carries the pre-edit key), the entry is removed and re-inserted
    /// under the new key, and a single `Changed` notification covering
    /// both the vacated and the newly occupied index is emitted.
    ///
    /// Changing a candidate that is not tracked is a caller contract
    /// violation and is a no-op. A change that moves the candidate to a
    /// different output line must be routed through
    /// [`CandidateIndex::apply`](crate::CandidateIndex::apply) instead.
    pub fn change(&mut self, updated: Candidate) -> Option<SetChange> {
        let old_index = self.entries.iter().position(|e| e.name == updated.name)?;
        self.entries.remove(old_index);
        // The name was just vacated, so the search cannot find an equal key.
        let new_index = match self
            .entries
            .binary_search_by(|e| candidate_order(e, &updated))
        {
            Ok(index) | Err(index) => index,
        };
        self.entries.insert(new_index, updated);
        let change = SetChange::Changed {
            from: old_index.min(new_index),
            to: old_index.max(new_index),
        };
        self.notify(change);
        Some(change)
    }

    /// The in-order candidate at a 0-based index, if in range.
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a candidate with this name is tracked.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate candidates in comparator order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select a tracked candidate. Returns false if it is not tracked.
    pub fn select(&mut self, candidate: &Candidate) -> bool {
        if self.names.contains(&candidate.name) {
            self.selected = Some(candidate.name.clone());
            true
        } else {
            false
        }
    }

    /// Select the first candidate whose content equals `content`.
    ///
    /// Returns the resolved candidate, or `None` (selection unchanged)
    /// if no content matches.
    pub fn select_content(&mut self, content: &str) -> Option<&Candidate> {
        let index = self.entries.iter().position(|e| e.content == content)?;
        self.selected = Some(self.entries[index].name.clone());
        self.entries.get(index)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected candidate, if any.
    pub fn selected(&self) -> Option<&Candidate> {
        let name = self.selected.as_deref()?;
        self.entries.iter().find(|e| e.name == name)
    }

    /// The in-order index of the selected candidate, if any.
    pub fn selected_index(&self) -> Option<usize> {
        let name = self.selected.as_deref()?;
        self.entries.iter().position(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cand(name: &str, content: &str, rank: u8) -> Candidate {
        Candidate::new(name, content, 1, rank, None)
    }

    /// Observer that records every notification it receives.
    struct Recorder(Rc<RefCell<Vec<SetChange>>>);

    impl LineSetObserver for Recorder {
        fn inserted(&mut self, index: usize) {
            self.0.borrow_mut().push(SetChange::Inserted(index));
        }
        fn removed(&mut self, index: usize) {
            self.0.borrow_mut().push(SetChange::Removed(index));
        }
        fn changed(&mut self, from: usize, to: usize) {
            self.0.borrow_mut().push(SetChange::Changed { from, to });
        }
    }

    fn recorded_set() -> (OrderedLineSet, Rc<RefCell<Vec<SetChange>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = OrderedLineSet::new();
        set.subscribe(Box::new(Recorder(Rc::clone(&log))));
        (set, log)
    }

    #[test]
    fn test_add_keeps_sorted_order() {
        let mut set = OrderedLineSet::new();
        set.add(cand("c", "MERGE LEFT", 20));
        set.add(cand("a", "ROAD WORK", 5));
        set.add(cand("b", "LANE CLOSED", 10));

        let contents: Vec<_> = set.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["ROAD WORK", "LANE CLOSED", "MERGE LEFT"]);

        // Full elementAt sweep matches the iteration order.
        for i in 0..set.len() {
            assert_eq!(set.get(i).unwrap().content, contents[i]);
        }
        assert_eq!(set.get(set.len()), None);
    }

    #[test]
    fn test_add_notifies_insertion_index() {
        let (mut set, log) = recorded_set();
        set.add(cand("a", "AAA", 5));
        set.add(cand("b", "BBB", 10));
        // Sorts before both existing entries.
        set.add(cand("c", "CCC", 1));

        assert_eq!(
            *log.borrow(),
            vec![
                SetChange::Inserted(0),
                SetChange::Inserted(1),
                SetChange::Inserted(0),
            ]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let (mut set, log) = recorded_set();
        let c = cand("a", "ROAD WORK", 5);
        assert!(set.add(c.clone()).is_some());
        assert!(set.add(c).is_none());

        assert_eq!(set.len(), 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_remove_notifies_prior_index() {
        let (mut set, log) = recorded_set();
        let a = cand("a", "AAA", 5);
        let b = cand("b", "BBB", 10);
        set.add(a.clone());
        set.add(b.clone());
        log.borrow_mut().clear();

        assert_eq!(set.remove(&b), Some(SetChange::Removed(1)));
        assert_eq!(set.len(), 1);
        assert_eq!(*log.borrow(), vec![SetChange::Removed(1)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut set, log) = recorded_set();
        set.add(cand("a", "AAA", 5));
        log.borrow_mut().clear();

        assert_eq!(set.remove(&cand("ghost", "GHOST", 1)), None);
        assert_eq!(set.len(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut set = OrderedLineSet::new();
        let a = cand("a", "AAA", 5);
        set.add(a.clone());
        assert!(set.select(&a));
        assert!(set.selected().is_some());

        set.remove(&a);
        assert!(set.selected().is_none());
    }

    #[test]
    fn test_change_range_covers_old_and_new_index() {
        let (mut set, log) = recorded_set();
        set.add(cand("a", "AAA", 1));
        set.add(cand("b", "BBB", 2));
        set.add(cand("c", "CCC", 3));
        log.borrow_mut().clear();

        // Promote "c" past both others: old index 2, new index 0.
        let mut edited = cand("c", "CCC", 3);
        edited.rank = 1;
        edited.content = "AA FIRST".to_string();
        assert_eq!(
            set.change(edited),
            Some(SetChange::Changed { from: 0, to: 2 })
        );
        assert_eq!(set.get(0).unwrap().name, "c");

        // Edit that keeps the position still notifies a (degenerate) range.
        let mut same_spot = cand("b", "BBB EDITED", 2);
        same_spot.rank = 2;
        assert_eq!(
            set.change(same_spot),
            Some(SetChange::Changed { from: 2, to: 2 })
        );
        assert_eq!(
            *log.borrow(),
            vec![
                SetChange::Changed { from: 0, to: 2 },
                SetChange::Changed { from: 2, to: 2 },
            ]
        );
    }

    #[test]
    fn test_change_untracked_is_noop() {
        let (mut set, log) = recorded_set();
        set.add(cand("a", "AAA", 5));
        log.borrow_mut().clear();

        assert_eq!(set.change(cand("ghost", "GHOST", 1)), None);
        assert_eq!(set.len(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_change_keeps_selection() {
        let mut set = OrderedLineSet::new();
        let a = cand("a", "AAA", 5);
        set.add(a.clone());
        set.add(cand("b", "BBB", 10));
        set.select(&a);

        let mut edited = a;
        edited.rank = 99;
        set.change(edited);
        assert_eq!(set.selected().unwrap().name, "a");
        assert_eq!(set.selected_index(), Some(1));
    }

    #[test]
    fn test_select_content_resolves_first_match() {
        let mut set = OrderedLineSet::new();
        set.add(cand("a", "ROAD WORK", 5));
        set.add(cand("b", "ROAD WORK", 10));
        set.add(cand("c", "OTHER", 1));

        let resolved = set.select_content("ROAD WORK").unwrap().name.clone();
        assert_eq!(resolved, "a");
        assert_eq!(set.selected_index(), Some(1)); // "OTHER" sorts first

        assert!(set.select_content("NO SUCH TEXT").is_none());
        // Failed resolution leaves the selection untouched.
        assert_eq!(set.selected().unwrap().name, "a");
    }

    #[test]
    fn test_remove_named_ignores_stale_key() {
        let mut set = OrderedLineSet::new();
        set.add(cand("a", "AAA", 5));
        set.add(cand("b", "BBB", 10));

        assert_eq!(set.remove_named("b"), Some(SetChange::Removed(1)));
        assert_eq!(set.remove_named("b"), None);
        assert_eq!(set.len(), 1);
    }
}
