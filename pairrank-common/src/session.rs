//! Ranking sessions and the comparison-submission state machine
//!
//! A ranking is Open while an unresolved pair remains, then permanently
//! Finished. All submission preconditions are checked before any mutation so
//! a rejected submission leaves the session byte-identical.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::driver::{compute_state, RankState};
use crate::error::{Error, Result};
use crate::model::RankingSummary;
use crate::poset::Poset;

/// One ranking attempt over an item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// Identity of the item set being ranked.
    pub set_hash: String,
    /// Shareable identifier; grants read-only viewing.
    pub public_token: String,
    /// Sole credential allowed to submit comparisons.
    pub private_token: String,
    pub title: String,
    /// The question shown with each offered pair.
    pub question: String,
    /// Monotone: set once the last pair is decided, never reset.
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub comparisons: Poset,
    /// Indices excluded from ranking entirely.
    #[serde(default)]
    pub ignore: BTreeSet<usize>,
}

impl Ranking {
    pub fn new(
        set_hash: impl Into<String>,
        public_token: impl Into<String>,
        private_token: impl Into<String>,
        title: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            set_hash: set_hash.into(),
            public_token: public_token.into(),
            private_token: private_token.into(),
            title: title.into(),
            question: question.into(),
            finished: false,
            comparisons: Poset::new(),
            ignore: BTreeSet::new(),
        }
    }

    /// Current driver view of this ranking for a set of `item_count` items.
    pub fn state(&self, item_count: usize) -> RankState {
        compute_state(item_count, &self.ignore, &self.comparisons)
    }

    pub fn summary(&self) -> RankingSummary {
        RankingSummary {
            public_token: self.public_token.clone(),
            title: self.title.clone(),
            finished: self.finished,
        }
    }

    /// Apply one answered comparison: `winner` beat the other of
    /// `(ix1, ix2)`.
    ///
    /// The submitted pair must be exactly the pair the driver currently
    /// offers; anything else (a duplicate network retry, a vote from a stale
    /// page) is rejected as `StaleOrInvalidPair` without mutating. Returns
    /// the post-submission driver state.
    pub fn submit(
        &mut self,
        item_count: usize,
        ix1: usize,
        ix2: usize,
        winner: usize,
    ) -> Result<RankState> {
        if self.finished {
            return Err(Error::AlreadyFinished);
        }

        let offered = self.state(item_count);
        let Some((exp1, exp2)) = offered.next_pair else {
            // No open question but the flag was not set; treat as finished
            // rather than corrupt the order.
            return Err(Error::AlreadyFinished);
        };

        if (ix1, ix2) != (exp1, exp2) {
            return Err(Error::StaleOrInvalidPair(format!(
                "submitted ({ix1}, {ix2}), offered ({exp1}, {exp2})"
            )));
        }
        if winner != ix1 && winner != ix2 {
            return Err(Error::StaleOrInvalidPair(format!(
                "winner {winner} is not one of ({ix1}, {ix2})"
            )));
        }

        let loser = if winner == ix1 { ix2 } else { ix1 };
        self.comparisons.record(loser, winner)?;
        tracing::debug!(
            ranking = %self.public_token,
            loser,
            winner,
            known = self.comparisons.len(),
            "comparison recorded"
        );

        let state = self.state(item_count);
        if state.is_finished() {
            self.finished = true;
            tracing::info!(ranking = %self.public_token, "ranking finished");
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking() -> Ranking {
        Ranking::new("hash", "pub", "priv", "Brian, by preference", "Which is better?")
    }

    #[test]
    fn test_vote_records_comparison_and_advances_question() {
        let mut r = ranking();
        let offered = r.state(3).next_pair.unwrap();
        assert_eq!(offered, (0, 1));

        // Index 1 wins over index 0
        let state = r.submit(3, 0, 1, 1).unwrap();

        assert!(r.comparisons.contains(0, 1));
        let (a, b) = state.next_pair.unwrap();
        assert!(a == 2 || b == 2);

        let pos = |ix| state.order.iter().position(|&o| o == ix).unwrap();
        assert!(pos(1) < pos(0));
    }

    #[test]
    fn test_votes_to_completion_flip_finished_once() {
        let mut r = ranking();
        let mut rounds = 0;
        loop {
            let state = r.state(3);
            let Some((a, b)) = state.next_pair else { break };
            // Lower index always wins
            r.submit(3, a, b, a.min(b)).unwrap();
            rounds += 1;
            assert!(rounds <= 3, "3 items need at most 3 questions");
        }

        assert!(r.finished);
        assert_eq!(r.state(3).order, vec![0, 1, 2]);

        let err = r.submit(3, 0, 1, 0).unwrap_err();
        assert!(matches!(err, Error::AlreadyFinished));
    }

    #[test]
    fn test_transitivity_saves_a_question() {
        let mut r = ranking();
        // 0 beats 1, then 1 beats 2: (2, 0) follows by closure, so the
        // ranking completes after two answers instead of three.
        r.submit(3, 0, 1, 0).unwrap();

        let (a, b) = r.state(3).next_pair.unwrap();
        assert_eq!((a, b), (1, 2));
        let state = r.submit(3, 1, 2, 1).unwrap();

        assert!(r.comparisons.contains(2, 0));
        assert!(state.is_finished());
        assert!(r.finished);
        assert_eq!(state.order, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_submission_mutates_only_once() {
        let mut r = ranking();
        let before = r.state(3).next_pair.unwrap();
        r.submit(3, before.0, before.1, before.1).unwrap();
        let after = r.comparisons.len();

        // Exact replay of the same request
        let err = r.submit(3, before.0, before.1, before.1).unwrap_err();
        assert!(matches!(err, Error::StaleOrInvalidPair(_)));
        assert_eq!(r.comparisons.len(), after);
    }

    #[test]
    fn test_stale_pair_rejected_without_mutation() {
        let mut r = ranking();
        let err = r.submit(3, 1, 2, 2).unwrap_err();
        assert!(matches!(err, Error::StaleOrInvalidPair(_)));
        assert!(r.comparisons.is_empty());
    }

    #[test]
    fn test_winner_outside_pair_rejected() {
        let mut r = ranking();
        let (a, b) = r.state(3).next_pair.unwrap();
        let err = r.submit(3, a, b, 2).unwrap_err();
        assert!(matches!(err, Error::StaleOrInvalidPair(_)));
        assert!(r.comparisons.is_empty());
    }

    #[test]
    fn test_ignored_indices_never_offered() {
        let mut r = ranking();
        r.ignore.insert(1);

        loop {
            let state = r.state(4);
            let Some((a, b)) = state.next_pair else { break };
            assert_ne!(a, 1);
            assert_ne!(b, 1);
            r.submit(4, a, b, b).unwrap();
        }
        assert!(r.finished);
        assert!(!r.state(4).order.contains(&1));
    }

    #[test]
    fn test_serde_round_trip_preserves_session() {
        let mut r = ranking();
        r.submit(3, 0, 1, 0).unwrap();

        let json = serde_json::to_string_pretty(&r).unwrap();
        let back: Ranking = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
