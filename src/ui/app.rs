use crate::controller::{GameController, GameEvent, Stage};
use crate::game::IgnoreReason;
use crate::scores::KeyValueStore;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::board_widget::TileGrid;
use super::game_view::{self, GameView};
use super::name_entry::{self, NameEntry, NameInput};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App<S> {
    controller: GameController<S>,
    columns: usize,
    cursor: usize,
    name_entry: NameEntry,
    should_quit: bool,
    message: Option<String>,
    /// Grid from the last draw; mouse clicks are resolved against it.
    grid: TileGrid,
    started: Instant,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(controller: GameController<S>, columns: usize) -> Self {
        let count = controller.board().len();
        App {
            controller,
            columns,
            cursor: 0,
            name_entry: NameEntry::new(),
            should_quit: false,
            message: Some("Find all the pairs!".to_string()),
            grid: TileGrid::new(Rect::default(), columns, count),
            started: Instant::now(),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.controller.advance(self.started.elapsed());
            self.apply_events();
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            let event = event::read()?;
            self.dispatch(event, self.started.elapsed());
        }
        Ok(())
    }

    /// Bring the controller clock up to `now`, then handle `event`, so
    /// anything it schedules counts from the moment of input.
    fn dispatch(&mut self, event: Event, now: Duration) {
        self.controller.advance(now);
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Stage::AwaitingName { .. } = self.controller.stage() {
            if let NameInput::Submitted(name) = self.name_entry.handle_key(key) {
                self.controller.submit_name(&name);
                self.cursor = 0;
            }
            self.apply_events();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.controller.select(self.cursor);
            }
            KeyCode::Char('r') => {
                self.controller.restart();
                self.cursor = 0;
            }
            _ => {}
        }
        self.apply_events();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(index) = self.grid.hit_test(mouse.column, mouse.row) {
            self.cursor = index;
            self.controller.select(index);
            self.apply_events();
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.cursor = self.grid.step(self.cursor, dx, dy);
    }

    /// Turn controller events into the status line.
    fn apply_events(&mut self) {
        for event in self.controller.drain_events() {
            let message = match event {
                GameEvent::Restarted { .. } => Some("New game started!".to_string()),
                GameEvent::Matched { .. } => Some("It's a match!".to_string()),
                GameEvent::Mismatched { .. } => Some("Not a match.".to_string()),
                GameEvent::Won { moves, seconds } => Some(format!(
                    "Cleared in {moves} moves and {seconds}s. Enter your name."
                )),
                GameEvent::ScoreRecorded { entry, rank } => Some(match rank {
                    Some(rank) => format!("{} placed #{} with {}s", entry.name(), rank + 1, entry.time()),
                    None => format!("{} finished in {}s", entry.name(), entry.time()),
                }),
                GameEvent::Ignored {
                    reason: IgnoreReason::AlreadyMatched,
                    ..
                } => Some("That pair is already matched.".to_string()),
                GameEvent::Revealed { .. }
                | GameEvent::Hidden { .. }
                | GameEvent::Ticked { .. }
                | GameEvent::Ignored { .. } => None,
            };
            if let Some(message) = message {
                self.message = Some(message);
            }
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let view = GameView {
            board: self.controller.board(),
            session: self.controller.session(),
            phase: self.controller.phase(),
            stage: self.controller.stage(),
            leaderboard: self.controller.leaderboard(),
            cursor: self.cursor,
            columns: self.columns,
            message: self.message.as_deref(),
        };
        self.grid = game_view::render(frame, &view);

        if let Stage::AwaitingName { moves, seconds } = self.controller.stage() {
            name_entry::render(
                frame,
                &self.name_entry,
                moves,
                seconds,
                &self.controller.settings().default_player_name,
            );
        }
    }
}
