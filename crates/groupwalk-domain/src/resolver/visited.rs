//! Shared visited set guarding traversal against cycles and duplicates.

use std::sync::Arc;

use dashmap::DashSet;

/// Set of group identifiers already claimed by a traversal.
///
/// This is the only memory the traversal keeps of where it has been: a group
/// that loses the [`check_and_insert`](VisitedSet::check_and_insert) race is
/// neither reported nor expanded again. Clones share the same underlying
/// set, so every worker of one resolution observes one traversal. State is
/// per-resolution; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<DashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records `group_id` as visited.
    ///
    /// Returns true when the group was already present. The check and the
    /// insert are a single linearizable operation: of any number of
    /// concurrent callers with the same new id, exactly one sees false.
    pub fn check_and_insert(&self, group_id: &str) -> bool {
        !self.inner.insert(group_id.to_string())
    }

    /// Number of groups claimed so far.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true when nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_reports_unvisited() {
        let visited = VisitedSet::new();
        assert!(!visited.check_and_insert("admins@corp.test"));
        assert!(visited.check_and_insert("admins@corp.test"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let visited = VisitedSet::new();
        let clone = visited.clone();
        assert!(!visited.check_and_insert("eng@corp.test"));
        assert!(
            clone.check_and_insert("eng@corp.test"),
            "clone should observe inserts made through the original"
        );
    }

    #[test]
    fn test_concurrent_inserts_admit_exactly_one() {
        let visited = VisitedSet::new();
        let winners = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let visited = visited.clone();
                    scope.spawn(move || !visited.check_and_insert("contested@corp.test"))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|won| *won)
                .count()
        });
        assert_eq!(
            winners, 1,
            "exactly one of the racing inserts should win the slot"
        );
        assert_eq!(visited.len(), 1);
    }
}
