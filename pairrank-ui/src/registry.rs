//! Registry of item sets and rankings
//!
//! The Session Coordinator's shared state: two token-indexed maps of
//! entries, each entry behind its own mutex so unrelated sessions never
//! serialize against each other. Cross-session operations that touch a map
//! (creation, token generation) serialize on that map's write lock.
//!
//! Persistence is one JSON file per item set (`set-<hash>.json`) and per
//! ranking (`ranking-<token>.json`) under the data directory. Every mutation
//! is applied to a working copy, written to disk, and only then committed to
//! the shared entry, so a failed write never leaves an in-memory-only
//! success and readers always see either the pre- or post-mutation snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use pairrank_common::error::{Error, Result};
use pairrank_common::model::ItemSet;
use pairrank_common::session::Ranking;
use pairrank_common::token;

pub struct Registry {
    data_dir: PathBuf,
    sets: RwLock<HashMap<String, Arc<Mutex<ItemSet>>>>,
    rankings: RwLock<HashMap<String, Arc<Mutex<Ranking>>>>,
}

impl Registry {
    /// Load every persisted set and ranking from `data_dir`.
    ///
    /// Unreadable or malformed files are skipped with a warning; one bad
    /// file must not take the whole service down.
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let mut sets = HashMap::new();
        let mut rankings = HashMap::new();

        for entry in std::fs::read_dir(&data_dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if name.starts_with("set-") && name.ends_with(".json") {
                match read_json::<ItemSet>(&path) {
                    Ok(set) => {
                        sets.insert(set.hash.clone(), Arc::new(Mutex::new(set)));
                    }
                    Err(e) => warn!("Skipping unreadable set file {}: {}", path.display(), e),
                }
            } else if name.starts_with("ranking-") && name.ends_with(".json") {
                match read_json::<Ranking>(&path) {
                    Ok(ranking) => {
                        rankings.insert(ranking.public_token.clone(), Arc::new(Mutex::new(ranking)));
                    }
                    Err(e) => warn!("Skipping unreadable ranking file {}: {}", path.display(), e),
                }
            }
        }

        info!(
            "Loaded {} item set(s) and {} ranking(s) from {}",
            sets.len(),
            rankings.len(),
            data_dir.display()
        );

        Ok(Self {
            data_dir,
            sets: RwLock::new(sets),
            rankings: RwLock::new(rankings),
        })
    }

    /// All known sets as `(hash, name)`, sorted by name (case-insensitive).
    pub async fn list_sets(&self) -> Vec<(String, String)> {
        let map = self.sets.read().await;
        let mut out = Vec::with_capacity(map.len());
        for entry in map.values() {
            let set = entry.lock().await;
            out.push((set.hash.clone(), set.name.clone()));
        }
        drop(map);
        out.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
        out
    }

    /// Snapshot of one item set.
    pub async fn set_snapshot(&self, hash: &str) -> Result<ItemSet> {
        let entry = self.set_entry(hash).await?;
        let set = entry.lock().await;
        Ok(set.clone())
    }

    /// Snapshot of one ranking.
    pub async fn ranking_snapshot(&self, public_token: &str) -> Result<Ranking> {
        let entry = self.ranking_entry(public_token).await?;
        let ranking = entry.lock().await;
        Ok(ranking.clone())
    }

    /// Snapshots of a ranking together with its item set.
    pub async fn ranking_view(&self, public_token: &str) -> Result<(ItemSet, Ranking)> {
        let ranking = self.ranking_snapshot(public_token).await?;
        let set = self.set_snapshot(&ranking.set_hash).await?;
        Ok((set, ranking))
    }

    /// Create an item set, deduplicating by content hash. Returns the hash
    /// and whether a new set was actually created.
    pub async fn create_set(&self, name: &str, items: Vec<String>) -> Result<(String, bool)> {
        let set = ItemSet::new(name, items);
        let hash = set.hash.clone();

        let mut map = self.sets.write().await;
        if map.contains_key(&hash) {
            debug!("Set {} already exists, reusing", hash);
            return Ok((hash, false));
        }

        write_json(&self.set_path(&hash), &set).await?;
        map.insert(hash.clone(), Arc::new(Mutex::new(set)));
        info!("Created item set {}", hash);
        Ok((hash, true))
    }

    /// Start a new ranking against an existing set: generate fresh tokens,
    /// persist the ranking and the set's updated summary list, then make the
    /// ranking visible.
    pub async fn start_ranking(
        &self,
        set_hash: &str,
        title: &str,
        question: &str,
    ) -> Result<Ranking> {
        let set_entry = self.set_entry(set_hash).await?;

        // Holding the map's write lock serializes token generation across
        // concurrent creations.
        let mut map = self.rankings.write().await;
        let public_token = token::generate_unique(|t| {
            map.contains_key(t) || self.ranking_path(t).exists()
        })?;
        let private_token = token::generate();

        let ranking = Ranking::new(set_hash, public_token.clone(), private_token, title, question);
        write_json(&self.ranking_path(&public_token), &ranking).await?;

        {
            let mut set = set_entry.lock().await;
            let mut updated = set.clone();
            updated.push_summary(ranking.summary());
            write_json(&self.set_path(set_hash), &updated).await?;
            *set = updated;
        }

        map.insert(public_token.clone(), Arc::new(Mutex::new(ranking.clone())));
        info!("Started ranking {} on set {}", public_token, set_hash);
        Ok(ranking)
    }

    /// Submit one answered comparison for a ranking.
    ///
    /// The caller's `secret` must match the ranking's private token. The
    /// whole mutate-persist-commit sequence runs under the ranking's mutex;
    /// when the ranking finishes, the owning set's summary is updated under
    /// the set's mutex (lock order is always ranking, then set).
    ///
    /// Returns the post-submission ranking snapshot.
    pub async fn submit(
        &self,
        public_token: &str,
        secret: &str,
        ix1: usize,
        ix2: usize,
        winner: usize,
    ) -> Result<Ranking> {
        let ranking_entry = self.ranking_entry(public_token).await?;
        let mut ranking = ranking_entry.lock().await;

        if secret != ranking.private_token {
            return Err(Error::Unauthorized(
                "You cannot vote in this ranking.".to_string(),
            ));
        }

        let set_entry = self.set_entry(&ranking.set_hash).await?;
        let item_count = set_entry.lock().await.items.len();

        let mut working = ranking.clone();
        working.submit(item_count, ix1, ix2, winner)?;
        write_json(&self.ranking_path(public_token), &working).await?;

        if working.finished && !ranking.finished {
            let mut set = set_entry.lock().await;
            let mut updated = set.clone();
            updated.finish_summary(public_token);
            write_json(&self.set_path(&working.set_hash), &updated).await?;
            *set = updated;
        }

        *ranking = working.clone();
        Ok(working)
    }

    async fn set_entry(&self, hash: &str) -> Result<Arc<Mutex<ItemSet>>> {
        self.sets
            .read()
            .await
            .get(hash)
            .cloned()
            .ok_or_else(|| Error::NotFound("That set does not exist.".to_string()))
    }

    async fn ranking_entry(&self, public_token: &str) -> Result<Arc<Mutex<Ranking>>> {
        self.rankings
            .read()
            .await
            .get(public_token)
            .cloned()
            .ok_or_else(|| Error::NotFound("That ranking does not exist.".to_string()))
    }

    fn set_path(&self, hash: &str) -> PathBuf {
        self.data_dir.join(format!("set-{hash}.json"))
    }

    fn ranking_path(&self, public_token: &str) -> PathBuf {
        self.data_dir.join(format!("ranking-{public_token}.json"))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
