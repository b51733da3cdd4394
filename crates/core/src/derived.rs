//! Client-side derivations recomputed on every reload.
//!
//! These are deliberately not stored relations: "projects visible to an
//! intern" and "comments by task" are rebuilt from whatever the last fetch
//! returned.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::Serialize;

/// Keep the first item for every distinct key, preserving input order.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Group items by key. Each group keeps the relative input order, so a
/// newest-first input yields newest-first groups.
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// "N of M tasks completed" summary for the intern task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub completed: usize,
    pub total: usize,
}

impl CompletionSummary {
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let mut summary = Self {
            completed: 0,
            total: 0,
        };
        for done in flags {
            summary.total += 1;
            if done {
                summary.completed += 1;
            }
        }
        summary
    }

    /// `None` when there is nothing to summarise.
    pub fn label(&self) -> Option<String> {
        (self.total > 0).then(|| format!("{} of {} tasks completed", self.completed, self.total))
    }
}
