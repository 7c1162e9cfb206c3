//! Terminal UI: the tile grid, leaderboard panel and name-entry popup.

mod app;
pub mod board_widget;
pub mod game_view;
pub mod name_entry;

pub use app::App;
