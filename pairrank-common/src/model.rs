//! Item sets and ranking summaries
//!
//! An item set is an immutable, ordered list of labels identified by the
//! content hash of its newline-joined items; two submissions of the same list
//! collapse to the same set. The set also carries a summary projection of
//! every ranking started against it, used for the set page listing. The
//! summary is updated explicitly by the coordinator, never through aliasing
//! with the full ranking record.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Summary projection of a ranking, embedded in its item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub public_token: String,
    pub title: String,
    pub finished: bool,
}

/// A fixed list of items to rank, shared read-only by any number of rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSet {
    /// Content hash of the newline-joined items; the set's identity.
    pub hash: String,
    /// Display name, free text.
    pub name: String,
    /// The item labels, addressed by zero-based position. Never reordered
    /// or mutated after creation.
    pub items: Vec<String>,
    /// Summaries of the rankings started against this set, finished first,
    /// then by title.
    #[serde(default)]
    pub rankings: Vec<RankingSummary>,
}

impl ItemSet {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            hash: content_hash(&items),
            name: name.into(),
            items,
            rankings: Vec::new(),
        }
    }

    /// Register a new ranking's summary, keeping the listing order.
    pub fn push_summary(&mut self, summary: RankingSummary) {
        self.rankings.push(summary);
        self.sort_summaries();
    }

    /// Mark the summary for `public_token` finished. Returns false if no
    /// such ranking is listed.
    pub fn finish_summary(&mut self, public_token: &str) -> bool {
        let Some(summary) = self
            .rankings
            .iter_mut()
            .find(|s| s.public_token == public_token)
        else {
            return false;
        };
        summary.finished = true;
        self.sort_summaries();
        true
    }

    fn sort_summaries(&mut self) {
        self.rankings
            .sort_by(|a, b| b.finished.cmp(&a.finished).then_with(|| a.title.cmp(&b.title)));
    }
}

/// SHA-256 hex of the newline-joined items: the deduplicating identity key
/// for an item set.
pub fn content_hash(items: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(items.join("\n").as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Split a pasted item list into labels: normalize line endings, strip
/// leading/trailing blank lines, trim each line.
pub fn parse_items(raw: &str) -> Vec<String> {
    raw.replace('\r', "")
        .trim()
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable_and_order_sensitive() {
        let items = vec!["alpha".to_string(), "beta".to_string()];
        let hash = content_hash(&items);

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, content_hash(&items));

        let reversed = vec!["beta".to_string(), "alpha".to_string()];
        assert_ne!(hash, content_hash(&reversed));
    }

    #[test]
    fn test_identical_submissions_collapse_to_one_identity() {
        let a = ItemSet::new("first", parse_items("x\ny\nz"));
        let b = ItemSet::new("second", parse_items("  x \r\ny\nz\n\n"));
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_parse_items_trims_lines_and_ends() {
        let items = parse_items("\r\n  Episode One  \r\nEpisode Two\n\nEpisode Three\n");
        assert_eq!(
            items,
            vec![
                "Episode One".to_string(),
                "Episode Two".to_string(),
                "".to_string(),
                "Episode Three".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_listing_finished_first_then_title() {
        let mut set = ItemSet::new("set", parse_items("a\nb"));
        set.push_summary(RankingSummary {
            public_token: "t1".into(),
            title: "zeta".into(),
            finished: false,
        });
        set.push_summary(RankingSummary {
            public_token: "t2".into(),
            title: "alpha".into(),
            finished: false,
        });
        set.push_summary(RankingSummary {
            public_token: "t3".into(),
            title: "mid".into(),
            finished: true,
        });

        let titles: Vec<&str> = set.rankings.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_finish_summary_updates_and_reorders() {
        let mut set = ItemSet::new("set", parse_items("a\nb"));
        set.push_summary(RankingSummary {
            public_token: "t1".into(),
            title: "beta".into(),
            finished: false,
        });
        set.push_summary(RankingSummary {
            public_token: "t2".into(),
            title: "alpha".into(),
            finished: false,
        });

        assert!(set.finish_summary("t1"));
        assert!(set.rankings[0].finished);
        assert_eq!(set.rankings[0].public_token, "t1");

        assert!(!set.finish_summary("missing"));
    }
}
