use crate::controller::Stage;
use crate::game::{Board, GameSession, Phase};
use crate::scores::Leaderboard;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{self, TileGrid};

/// Everything the game screen shows, borrowed from the app for one frame.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub session: &'a GameSession,
    pub phase: Phase,
    pub stage: Stage,
    pub leaderboard: &'a Leaderboard,
    pub cursor: usize,
    pub columns: usize,
    pub message: Option<&'a str>,
}

/// Render the game screen and return the tile grid that was drawn, for
/// mouse hit-testing.
pub fn render(frame: &mut Frame, view: &GameView) -> TileGrid {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board + leaderboard
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(24), Constraint::Length(28)])
        .split(chunks[1]);

    render_header(frame, view, chunks[0]);
    let grid = render_board(frame, view, main[0]);
    render_leaderboard(frame, view.leaderboard, main[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);

    grid
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, color) = match (view.stage, view.phase) {
        (Stage::AwaitingName { .. }, _) => ("Cleared!", Color::Green),
        (_, Phase::Locked { .. }) => ("No match", Color::Red),
        (_, Phase::OneRevealed { .. }) => ("Pick a partner", Color::Yellow),
        (_, Phase::Idle) => ("Pick a tile", Color::White),
    };

    let header = Line::from(vec![
        Span::styled(
            format!("Moves: {}", view.session.moves()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Time: {}s", view.session.elapsed_secs()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::raw(format!(
            "Pairs: {}/{}",
            view.session.matched_pairs(),
            view.board.pairs()
        )),
        Span::raw("  |  "),
        Span::styled(status, Style::default().fg(color)),
    ]);

    let widget = Paragraph::new(header)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Memory Match"));

    frame.render_widget(widget, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) -> TileGrid {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = TileGrid::new(inner, view.columns, view.board.len());
    let cursor = matches!(view.stage, Stage::Playing).then_some(view.cursor);
    board_widget::render_tiles(frame, view.board, &grid, cursor);
    grid
}

fn render_leaderboard(frame: &mut Frame, leaderboard: &Leaderboard, area: Rect) {
    let mut lines = Vec::new();

    if leaderboard.is_empty() {
        lines.push(Line::from(Span::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (rank, entry) in leaderboard.iter().enumerate() {
        let color = match rank {
            0 => Color::Yellow,
            1 => Color::Gray,
            2 => Color::LightRed,
            _ => Color::White,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(color)),
            Span::raw(format!("{:<16}", entry.name())),
            Span::styled(
                format!("{:>4}s", entry.time()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Best Times"),
    );

    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Click / Arrows+Enter: Flip  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
