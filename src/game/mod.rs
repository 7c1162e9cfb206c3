//! Core memory-match logic: deck and board layout, shuffling, the session
//! clock, and the tile/phase state machine.

mod board;
mod session;
mod shuffle;
mod state;
mod timer;

pub use board::{Board, Deck, Tile, TileState, DEFAULT_SYMBOLS};
pub use session::{GameSession, SessionId};
pub use shuffle::shuffle;
pub use state::{BoardMachine, IgnoreReason, Phase, SelectOutcome};
pub use timer::{Timer, TimerState};
