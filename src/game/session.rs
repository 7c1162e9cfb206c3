use std::fmt;

use super::timer::Timer;

/// Identity of one playthrough. Scheduled work is tagged with it so that a
/// restart can tell stale callbacks apart from live ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn first() -> Self {
        SessionId(1)
    }

    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-session counters. Owned by the controller and lent to the board
/// state machine for each selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    id: SessionId,
    moves: u32,
    matched_pairs: usize,
    timer: Timer,
}

impl GameSession {
    pub fn new(id: SessionId) -> Self {
        GameSession {
            id,
            moves: 0,
            matched_pairs: 0,
            timer: Timer::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Completed two-tile comparisons.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub(crate) fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn record_match(&mut self) {
        self.matched_pairs += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_advance() {
        let first = SessionId::first();
        assert_eq!(first.get(), 1);
        assert_eq!(first.next().get(), 2);
        assert!(first < first.next());
        assert_eq!(first.next().to_string(), "#2");
    }

    #[test]
    fn test_new_session_is_zeroed() {
        let session = GameSession::new(SessionId::first());
        assert_eq!(session.moves(), 0);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.timer().has_started());
    }
}
