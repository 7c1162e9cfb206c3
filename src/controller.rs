//! Game controller: owns the session, routes tile selects into the board
//! state machine, runs the timer and mismatch callbacks through the
//! scheduler, and hands finished sessions to the score store.

use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::game::{
    Board, BoardMachine, Deck, GameSession, IgnoreReason, Phase, SelectOutcome, SessionId,
};
use crate::scheduler::{Scheduler, TaskId};
use crate::scores::{KeyValueStore, Leaderboard, ScoreEntry, ScoreStore, DEFAULT_PLAYER_NAME};

/// Pacing and deck used by every session the controller starts.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub deck: Deck,
    pub mismatch_delay: Duration,
    pub tick_interval: Duration,
    pub default_player_name: String,
}

impl GameSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(GameSettings {
            deck: config.game.deck()?,
            mismatch_delay: config.game.mismatch_delay(),
            tick_interval: config.game.tick_interval(),
            default_player_name: config.leaderboard.default_player_name.clone(),
        })
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            deck: Deck::default(),
            mismatch_delay: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

/// Work the controller schedules for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    TimerTick,
    HideMismatch([usize; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Playing,
    /// Board cleared; final figures are frozen until a name is submitted.
    AwaitingName { moves: u32, seconds: u64 },
}

/// Notifications for the render surface, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Restarted { session: SessionId, tiles: usize },
    Revealed { index: usize },
    Matched { pair: [usize; 2] },
    Mismatched { pair: [usize; 2] },
    Hidden { pair: [usize; 2] },
    Ticked { seconds: u64 },
    Won { moves: u32, seconds: u64 },
    ScoreRecorded { entry: ScoreEntry, rank: Option<usize> },
    Ignored { index: usize, reason: IgnoreReason },
}

pub struct GameController<S> {
    settings: GameSettings,
    rng: StdRng,
    machine: BoardMachine,
    session: GameSession,
    stage: Stage,
    scheduler: Scheduler<Task>,
    timer_task: Option<TaskId>,
    scores: ScoreStore<S>,
    leaderboard: Leaderboard,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> GameController<S> {
    /// Load the leaderboard and deal the first board.
    pub fn new(settings: GameSettings, scores: ScoreStore<S>, mut rng: StdRng) -> Self {
        let leaderboard = scores.load_leaderboard();
        let session = GameSession::new(SessionId::first());
        let machine = BoardMachine::new(Board::shuffled(&settings.deck, &mut rng));

        info!(
            session = %session.id(),
            pairs = settings.deck.pairs(),
            scores = leaderboard.len(),
            "game started"
        );

        let events = vec![GameEvent::Restarted {
            session: session.id(),
            tiles: machine.board().len(),
        }];

        GameController {
            settings,
            rng,
            machine,
            session,
            stage: Stage::Playing,
            scheduler: Scheduler::new(),
            timer_task: None,
            scores,
            leaderboard,
            events,
        }
    }

    pub fn board(&self) -> &Board {
        self.machine.board()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Clock reading of the scheduler, i.e. the last time passed to `advance`.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Abandon the current session and deal a fresh board.
    pub fn restart(&mut self) {
        let old = self.session.id();
        let cancelled = self.scheduler.cancel_session(old);
        self.timer_task = None;

        self.session = GameSession::new(old.next());
        self.machine = BoardMachine::new(Board::shuffled(&self.settings.deck, &mut self.rng));
        self.stage = Stage::Playing;

        info!(session = %self.session.id(), previous = %old, cancelled, "game restarted");
        self.events.push(GameEvent::Restarted {
            session: self.session.id(),
            tiles: self.machine.board().len(),
        });
    }

    /// Handle a tile select from the render surface.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        let outcome = match self.stage {
            Stage::AwaitingName { .. } => SelectOutcome::Ignored(IgnoreReason::SessionOver),
            Stage::Playing => self.machine.select(&mut self.session, index),
        };

        match outcome {
            SelectOutcome::FirstReveal {
                index,
                timer_started,
            } => {
                self.events.push(GameEvent::Revealed { index });
                if timer_started {
                    debug!(session = %self.session.id(), "timer started");
                    self.schedule_tick();
                }
            }
            SelectOutcome::Matched { pair, won } => {
                self.events.push(GameEvent::Revealed { index: pair[1] });
                self.events.push(GameEvent::Matched { pair });
                info!(
                    session = %self.session.id(),
                    matched = self.session.matched_pairs(),
                    moves = self.session.moves(),
                    "pair matched"
                );
                if won {
                    self.finish();
                }
            }
            SelectOutcome::Mismatched { pair } => {
                self.events.push(GameEvent::Revealed { index: pair[1] });
                self.events.push(GameEvent::Mismatched { pair });
                debug!(session = %self.session.id(), ?pair, "mismatch, board locked");
                self.scheduler.schedule(
                    self.settings.mismatch_delay,
                    self.session.id(),
                    Task::HideMismatch(pair),
                );
            }
            SelectOutcome::Ignored(reason) => {
                debug!(index, ?reason, "select ignored");
                self.events.push(GameEvent::Ignored { index, reason });
            }
        }

        outcome
    }

    /// Move the clock to `now` (time since the controller was created) and
    /// run every callback that has fallen due.
    pub fn advance(&mut self, now: Duration) {
        while let Some(due) = self.scheduler.pop_due(now) {
            if due.session != self.session.id() {
                debug!(stale = %due.session, current = %self.session.id(), "dropping stale task");
                continue;
            }

            match due.task {
                Task::TimerTick => {
                    self.timer_task = None;
                    if self.session.timer_mut().tick() {
                        self.events.push(GameEvent::Ticked {
                            seconds: self.session.elapsed_secs(),
                        });
                        self.schedule_tick();
                    }
                }
                Task::HideMismatch(pair) => {
                    if self.machine.resolve_mismatch(pair) {
                        self.events.push(GameEvent::Hidden { pair });
                    }
                }
            }
        }
    }

    /// Completion callback of the name-entry surface. Records the score,
    /// refreshes the leaderboard and starts the next game. Returns `None`
    /// when no session is waiting for a name.
    pub fn submit_name(&mut self, name: &str) -> Option<ScoreEntry> {
        let Stage::AwaitingName { seconds, .. } = self.stage else {
            return None;
        };

        let entry = ScoreEntry::with_fallback(name, &self.settings.default_player_name, seconds);
        let recorded = self.scores.record_score(entry.clone());
        let rank = recorded.rank;
        self.leaderboard = recorded.leaderboard;

        self.events.push(GameEvent::ScoreRecorded {
            entry: entry.clone(),
            rank,
        });
        self.restart();
        Some(entry)
    }

    fn schedule_tick(&mut self) {
        if let Some(old) = self.timer_task.take() {
            self.scheduler.cancel(old);
        }
        let id = self.scheduler.schedule(
            self.settings.tick_interval,
            self.session.id(),
            Task::TimerTick,
        );
        self.timer_task = Some(id);
    }

    fn finish(&mut self) {
        if let Some(task) = self.timer_task.take() {
            self.scheduler.cancel(task);
        }

        let moves = self.session.moves();
        let seconds = self.session.elapsed_secs();
        self.stage = Stage::AwaitingName { moves, seconds };

        info!(session = %self.session.id(), moves, seconds, "board cleared");
        self.events.push(GameEvent::Won { moves, seconds });
    }
}
