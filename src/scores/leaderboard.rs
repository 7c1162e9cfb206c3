use serde::{Deserialize, Serialize};

/// Name recorded when the player leaves the name field blank.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// How many entries the leaderboard keeps.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// One finished session: who played and how many seconds it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    name: String,
    time: u64,
}

impl ScoreEntry {
    /// Build an entry. The name is trimmed; a blank name becomes
    /// [`DEFAULT_PLAYER_NAME`].
    pub fn new(name: impl AsRef<str>, time: u64) -> Self {
        Self::with_fallback(name, DEFAULT_PLAYER_NAME, time)
    }

    /// Like [`ScoreEntry::new`] but with a caller-chosen placeholder name.
    pub fn with_fallback(name: impl AsRef<str>, fallback: &str, time: u64) -> Self {
        let trimmed = name.as_ref().trim();
        let name = if trimmed.is_empty() {
            fallback.trim()
        } else {
            trimmed
        };
        let name = if name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            name
        };

        ScoreEntry {
            name: name.to_string(),
            time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds taken to clear the board.
    pub fn time(&self) -> u64 {
        self.time
    }
}

/// Best times first, ties in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    /// Add `entry`, keep the `capacity` lowest times. Returns the entry's
    /// 0-based rank, or `None` if it did not make the cut.
    pub fn insert(&mut self, entry: ScoreEntry, capacity: usize) -> Option<usize> {
        // after every existing entry with the same or a lower time
        let rank = self.entries.partition_point(|e| e.time <= entry.time);
        self.entries.insert(rank, entry);
        self.entries.truncate(capacity);
        (rank < self.entries.len()).then_some(rank)
    }

    /// Restore the invariants on data read back from storage: drop entries
    /// with blank names, stable-sort by time and cap the length.
    pub fn normalized(mut self, capacity: usize) -> Self {
        self.entries.retain(|e| !e.name.trim().is_empty());
        self.entries.sort_by_key(|e| e.time);
        self.entries.truncate(capacity);
        self
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a ScoreEntry;
    type IntoIter = std::slice::Iter<'a, ScoreEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
