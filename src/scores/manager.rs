use super::leaderboard::{Leaderboard, ScoreEntry, LEADERBOARD_CAPACITY};
use super::store::KeyValueStore;

/// Storage key used by default for the serialized leaderboard.
pub const DEFAULT_SCORES_KEY: &str = "highScores";

/// Result of [`ScoreStore::record_score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedScore {
    pub leaderboard: Leaderboard,
    /// 0-based position of the new entry, `None` if it was cut.
    pub rank: Option<usize>,
}

/// Reads and writes the leaderboard through a [`KeyValueStore`].
///
/// Storage failures never reach the caller: an unreadable leaderboard loads
/// as empty and a failed write still returns the updated list.
pub struct ScoreStore<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(store: S) -> Self {
        ScoreStore {
            store,
            key: DEFAULT_SCORES_KEY.to_string(),
            capacity: LEADERBOARD_CAPACITY,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The persisted leaderboard, or an empty one if nothing usable is stored.
    pub fn load_leaderboard(&self) -> Leaderboard {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Leaderboard::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "leaderboard unreadable, starting empty");
                return Leaderboard::new();
            }
        };

        match serde_json::from_str::<Leaderboard>(&raw) {
            Ok(board) => board.normalized(self.capacity),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "leaderboard corrupt, starting empty");
                Leaderboard::new()
            }
        }
    }

    /// Add `entry`, keep the best times, persist, and return the new list
    /// with the rank the entry landed at.
    pub fn record_score(&mut self, entry: ScoreEntry) -> RecordedScore {
        let mut leaderboard = self.load_leaderboard();
        let name = entry.name().to_string();
        let time = entry.time();

        let rank = leaderboard.insert(entry, self.capacity);
        match rank {
            Some(rank) => tracing::info!(%name, time, rank = rank + 1, "score recorded"),
            None => tracing::info!(%name, time, "score outside the leaderboard"),
        }

        let persisted = serde_json::to_string(&leaderboard)
            .map_err(crate::error::StoreError::from)
            .and_then(|json| self.store.set(&self.key, json));
        if let Err(e) = persisted {
            tracing::warn!(key = %self.key, error = %e, "failed to persist leaderboard");
        }

        RecordedScore { leaderboard, rank }
    }
}
