//! Ranking driver
//!
//! Derives, from the current comparison set, both the next question to ask
//! and the best-known display order, in a single pass: the candidates are run
//! through a stable sort whose comparator latches the first pair it cannot
//! resolve. If the sort completes without latching anything, every pair is
//! decided and the ranking is finished.
//!
//! The offered pair is an artifact of the sort's traversal order, not a
//! chosen questioning strategy. The sort is pinned to a specific stable
//! insertion sort so that identical inputs always yield the identical
//! `next_pair` and `order` (repeated renders of the same session must show
//! the same question).
//!
//! `std`'s `sort_by` is deliberately not used: the comparator reports
//! unrelated indices as equal, which does not satisfy the total-order
//! contract `sort_by` asserts.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::poset::Poset;

/// Result of one driver evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankState {
    /// The next unresolved pair to put to the user, or `None` when the
    /// ranking is complete.
    pub next_pair: Option<(usize, usize)>,
    /// Best-known ordering of all non-ignored indices, winners first.
    /// Indices with no decided relation keep their relative input order.
    pub order: Vec<usize>,
}

impl RankState {
    pub fn is_finished(&self) -> bool {
        self.next_pair.is_none()
    }
}

/// Evaluate the driver for `item_count` items, excluding `ignore`, against
/// the comparison set in `poset` (assumed transitively closed).
pub fn compute_state(item_count: usize, ignore: &BTreeSet<usize>, poset: &Poset) -> RankState {
    let candidates: Vec<usize> = (0..item_count).filter(|i| !ignore.contains(i)).collect();
    let mut next_pair: Option<(usize, usize)> = None;

    let order = {
        let mut cmp = |a: usize, b: usize| -> Ordering {
            if a == b {
                return Ordering::Equal;
            }
            // Winners sort first: a known "a below b" puts a after b.
            if poset.contains(a, b) {
                return Ordering::Greater;
            }
            if poset.contains(b, a) {
                return Ordering::Less;
            }
            if next_pair.is_none() {
                next_pair = Some((a, b));
            }
            Ordering::Equal
        };
        stable_sort(candidates, &mut cmp)
    };

    RankState { next_pair, order }
}

/// Stable insertion sort tolerant of a partial comparator.
///
/// Each element moves left past strictly greater neighbors and stops at the
/// first neighbor that compares less-or-equal, so elements the comparator
/// cannot separate keep their relative input order.
fn stable_sort(mut v: Vec<usize>, cmp: &mut impl FnMut(usize, usize) -> Ordering) -> Vec<usize> {
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp(v[j - 1], v[j]) == Ordering::Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poset_of(relations: &[(usize, usize)]) -> Poset {
        let mut poset = Poset::new();
        for &(l, m) in relations {
            poset.record(l, m).unwrap();
        }
        poset
    }

    #[test]
    fn test_no_comparisons_offers_first_pair_in_input_order() {
        let state = compute_state(3, &BTreeSet::new(), &Poset::new());

        assert_eq!(state.next_pair, Some((0, 1)));
        assert_eq!(state.order, vec![0, 1, 2]);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_single_relation_moves_winner_first_and_asks_about_rest() {
        // Index 1 beat index 0
        let poset = poset_of(&[(0, 1)]);
        let state = compute_state(3, &BTreeSet::new(), &poset);

        let (a, b) = state.next_pair.expect("two pairs are still undecided");
        assert!(a == 2 || b == 2, "next question must involve index 2");

        let pos = |ix| state.order.iter().position(|&o| o == ix).unwrap();
        assert!(pos(1) < pos(0), "winner must display before loser");
    }

    #[test]
    fn test_full_chain_is_finished_and_ordered() {
        // 2 beat 1, 1 beat 0; closure supplies (0, 2)
        let poset = poset_of(&[(0, 1), (1, 2)]);
        let state = compute_state(3, &BTreeSet::new(), &poset);

        assert!(state.is_finished());
        assert_eq!(state.order, vec![2, 1, 0]);
    }

    #[test]
    fn test_completion_requires_every_pair_decided() {
        // 3 items, only one relation: not finished
        let poset = poset_of(&[(2, 0)]);
        let state = compute_state(3, &BTreeSet::new(), &poset);
        assert!(!state.is_finished());

        // Decide the rest through votes 0-over-1 and 2-over-1
        let poset = poset_of(&[(2, 0), (1, 0), (1, 2)]);
        let state = compute_state(3, &BTreeSet::new(), &poset);
        assert!(state.is_finished());
        assert_eq!(state.order, vec![0, 2, 1]);
    }

    #[test]
    fn test_ignored_indices_never_appear() {
        let ignore: BTreeSet<usize> = [1].into_iter().collect();
        let state = compute_state(4, &ignore, &Poset::new());

        assert!(!state.order.contains(&1));
        let (a, b) = state.next_pair.unwrap();
        assert_ne!(a, 1);
        assert_ne!(b, 1);
    }

    #[test]
    fn test_ignored_pair_completion() {
        // With index 2 ignored, the single relation 0 < 1 completes a
        // two-item ranking
        let ignore: BTreeSet<usize> = [2].into_iter().collect();
        let poset = poset_of(&[(0, 1)]);
        let state = compute_state(3, &ignore, &poset);

        assert!(state.is_finished());
        assert_eq!(state.order, vec![1, 0]);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let poset = poset_of(&[(0, 3), (4, 1)]);
        let ignore: BTreeSet<usize> = [2].into_iter().collect();

        let first = compute_state(6, &ignore, &poset);
        for _ in 0..10 {
            assert_eq!(compute_state(6, &ignore, &poset), first);
        }
    }

    #[test]
    fn test_undecided_indices_keep_relative_input_order() {
        // 4 beat 3; everything else unknown. The untouched indices must
        // stay in ascending input order.
        let poset = poset_of(&[(3, 4)]);
        let state = compute_state(5, &BTreeSet::new(), &poset);

        let untouched: Vec<usize> = state
            .order
            .iter()
            .copied()
            .filter(|&ix| ix != 3 && ix != 4)
            .collect();
        assert_eq!(untouched, vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_and_one_item_sets_are_trivially_finished() {
        let state = compute_state(0, &BTreeSet::new(), &Poset::new());
        assert!(state.is_finished());
        assert!(state.order.is_empty());

        let state = compute_state(1, &BTreeSet::new(), &Poset::new());
        assert!(state.is_finished());
        assert_eq!(state.order, vec![0]);
    }
}
