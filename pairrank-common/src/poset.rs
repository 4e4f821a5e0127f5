//! Partial-order store
//!
//! Holds the known "ranks below" relations for one ranking session and keeps
//! them transitively closed. Pure in-memory data structure; persistence is
//! the storage layer's concern (the whole set is serialized inline in the
//! session's JSON file).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One known relation between two item indices: `less` ranks below `more`.
///
/// The pair is ordered: `(a, b)` and `(b, a)` are distinct relations, and a
/// well-formed store never contains both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub less: usize,
    pub more: usize,
}

impl Comparison {
    pub fn new(less: usize, more: usize) -> Self {
        Self { less, more }
    }
}

/// Transitively closed, acyclic set of comparisons for one session.
///
/// Relations are write-once: there is no removal operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Poset {
    relations: BTreeSet<Comparison>,
}

impl Poset {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `less` is known to rank below `more` (direct or via closure).
    pub fn contains(&self, less: usize, more: usize) -> bool {
        self.relations.contains(&Comparison::new(less, more))
    }

    /// True iff the relative order of `a` and `b` is known in either direction.
    pub fn decided(&self, a: usize, b: usize) -> bool {
        self.contains(a, b) || self.contains(b, a)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comparison> {
        self.relations.iter()
    }

    /// Record that `less` ranks below `more` and restore transitive closure.
    ///
    /// Closure is maintained incrementally: every index already known to rank
    /// below `less` (plus `less` itself) is related to every index already
    /// known to rank above `more` (plus `more` itself). No global
    /// recomputation takes place.
    ///
    /// Refuses the write with `ConflictingRelation` if any implied relation
    /// would reverse one already recorded; in that case the store is left
    /// untouched.
    pub fn record(&mut self, less: usize, more: usize) -> Result<()> {
        if less == more {
            return Err(Error::ConflictingRelation { less, more });
        }
        if self.contains(more, less) {
            return Err(Error::ConflictingRelation { less, more });
        }

        let mut ancestors: Vec<usize> = self
            .relations
            .iter()
            .filter(|c| c.more == less)
            .map(|c| c.less)
            .collect();
        ancestors.push(less);

        let mut descendants: Vec<usize> = self
            .relations
            .iter()
            .filter(|c| c.less == more)
            .map(|c| c.more)
            .collect();
        descendants.push(more);

        // Validate the whole cross product before inserting anything so a
        // detected conflict leaves no partial update behind.
        for &a in &ancestors {
            for &d in &descendants {
                if self.contains(d, a) {
                    return Err(Error::ConflictingRelation { less: a, more: d });
                }
            }
        }

        for &a in &ancestors {
            for &d in &descendants {
                self.relations.insert(Comparison::new(a, d));
            }
        }

        Ok(())
    }
}
