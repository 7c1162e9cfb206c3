//! Leaderboard persistence: score entries, the ranked list, and the
//! key-value storage it is serialized into.

mod leaderboard;
mod manager;
mod store;

pub use leaderboard::{Leaderboard, ScoreEntry, DEFAULT_PLAYER_NAME, LEADERBOARD_CAPACITY};
pub use manager::{RecordedScore, ScoreStore, DEFAULT_SCORES_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
