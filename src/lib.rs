//! # Memory Match
//!
//! A memory-matching card game for the terminal. Tiles are dealt face down,
//! two are flipped per move, and a cleared board is timed and entered into a
//! persisted top-10 leaderboard. The terminal UI is built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: deck, shuffler, timer, board state machine
//! - [`scheduler`]: Cancellable delayed callbacks tagged by session
//! - [`scores`]: Leaderboard, key-value stores, score persistence
//! - [`controller`]: Session lifecycle tying the above together
//! - [`ui`]: Terminal UI: board, leaderboard, name entry
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod scheduler;
pub mod scores;
pub mod ui;
