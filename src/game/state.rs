use super::{Board, GameSession, TileState};

/// Board-global phase of the match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tile awaiting a partner.
    Idle,
    /// One tile revealed, waiting for the second pick.
    OneRevealed { first: usize },
    /// A mismatched pair is showing; selects are dropped until it is hidden.
    Locked { pair: [usize; 2] },
}

/// Why a select had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutOfRange,
    Locked,
    AlreadyMatched,
    AlreadyRevealed,
    /// The session has been won and is waiting for a name.
    SessionOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First tile of a turn revealed. `timer_started` is set on the first
    /// flip of the session.
    FirstReveal { index: usize, timer_started: bool },
    /// Second tile revealed and paired with the first.
    Matched { pair: [usize; 2], won: bool },
    /// Second tile revealed but the symbols differ; the board is now locked.
    Mismatched { pair: [usize; 2] },
    Ignored(IgnoreReason),
}

/// Tile and phase transitions for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMachine {
    board: Board,
    phase: Phase,
}

impl BoardMachine {
    pub fn new(board: Board) -> Self {
        BoardMachine {
            board,
            phase: Phase::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked { .. })
    }

    /// Apply a tile select. Moves and matched pairs are counted on `session`,
    /// and its timer is started on the first flip and stopped on the win.
    pub fn select(&mut self, session: &mut GameSession, index: usize) -> SelectOutcome {
        let Some(tile) = self.board.tile(index) else {
            return SelectOutcome::Ignored(IgnoreReason::OutOfRange);
        };

        if self.is_locked() {
            return SelectOutcome::Ignored(IgnoreReason::Locked);
        }

        match tile.state() {
            TileState::Matched => return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched),
            TileState::Revealed => return SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed),
            TileState::Hidden => {}
        }

        match self.phase {
            Phase::Idle => {
                self.board.set_state(index, TileState::Revealed);
                self.phase = Phase::OneRevealed { first: index };

                let timer_started = !session.timer().has_started();
                if timer_started {
                    session.timer_mut().start();
                }

                SelectOutcome::FirstReveal {
                    index,
                    timer_started,
                }
            }
            Phase::OneRevealed { first } => {
                self.board.set_state(index, TileState::Revealed);
                session.record_move();
                let pair = [first, index];

                if self.symbol(first) == self.symbol(index) {
                    self.board.set_state(first, TileState::Matched);
                    self.board.set_state(index, TileState::Matched);
                    session.record_match();
                    self.phase = Phase::Idle;

                    let won = session.matched_pairs() == self.board.pairs();
                    if won {
                        session.timer_mut().stop();
                    }
                    SelectOutcome::Matched { pair, won }
                } else {
                    self.phase = Phase::Locked { pair };
                    SelectOutcome::Mismatched { pair }
                }
            }
            Phase::Locked { .. } => unreachable!("locked phase handled above"),
        }
    }

    /// Turn a mismatched pair face down again and unlock the board.
    /// Returns false when `pair` is not the pair currently locked.
    pub fn resolve_mismatch(&mut self, pair: [usize; 2]) -> bool {
        match self.phase {
            Phase::Locked { pair: locked } if locked == pair => {
                for index in pair {
                    self.board.set_state(index, TileState::Hidden);
                }
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }

    fn symbol(&self, index: usize) -> &str {
        self.board.tiles()[index].symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionId;

    // Six symbols laid out so that tiles 0/1 match and 0/2 do not.
    const LAYOUT: [&str; 12] = [
        "Ryu", "Ryu", "Ken", "Ken", "ChunLi", "ChunLi", "Guile", "Guile", "Blanka", "Blanka",
        "E.Honda", "E.Honda",
    ];

    fn machine() -> (BoardMachine, GameSession) {
        let board = Board::from_layout(&LAYOUT).unwrap();
        (BoardMachine::new(board), GameSession::new(SessionId::first()))
    }

    #[test]
    fn test_first_pick_reveals_and_starts_timer() {
        let (mut m, mut s) = machine();

        let outcome = m.select(&mut s, 4);
        assert_eq!(
            outcome,
            SelectOutcome::FirstReveal {
                index: 4,
                timer_started: true
            }
        );
        assert_eq!(m.phase(), Phase::OneRevealed { first: 4 });
        assert_eq!(m.board().tile(4).unwrap().state(), TileState::Revealed);
        assert_eq!(s.moves(), 0);
        assert!(s.timer().is_running());
    }

    #[test]
    fn test_matching_pair() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 0);
        let outcome = m.select(&mut s, 1);

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                pair: [0, 1],
                won: false
            }
        );
        assert_eq!(m.board().tile(0).unwrap().state(), TileState::Matched);
        assert_eq!(m.board().tile(1).unwrap().state(), TileState::Matched);
        assert_eq!(s.matched_pairs(), 1);
        assert_eq!(s.moves(), 1);
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn test_mismatch_locks_then_resolves() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 0);
        let outcome = m.select(&mut s, 2);
        assert_eq!(outcome, SelectOutcome::Mismatched { pair: [0, 2] });
        assert!(m.is_locked());
        assert_eq!(s.moves(), 1);

        assert!(m.resolve_mismatch([0, 2]));
        assert_eq!(m.board().tile(0).unwrap().state(), TileState::Hidden);
        assert_eq!(m.board().tile(2).unwrap().state(), TileState::Hidden);
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_locked_board_drops_selects() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 0);
        m.select(&mut s, 2);

        assert_eq!(m.select(&mut s, 5), SelectOutcome::Ignored(IgnoreReason::Locked));
        assert_eq!(m.board().tile(5).unwrap().state(), TileState::Hidden);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_resolve_wrong_pair_is_rejected() {
        let (mut m, mut s) = machine();

        assert!(!m.resolve_mismatch([0, 2]));

        m.select(&mut s, 0);
        m.select(&mut s, 2);
        assert!(!m.resolve_mismatch([2, 4]));
        assert!(m.is_locked());
    }

    #[test]
    fn test_same_tile_twice_is_noop() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 3);
        let before = (m.clone(), s.clone());

        assert_eq!(
            m.select(&mut s, 3),
            SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed)
        );
        assert_eq!((m, s), before);
    }

    #[test]
    fn test_matched_tiles_are_inert() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 0);
        m.select(&mut s, 1);

        assert_eq!(
            m.select(&mut s, 0),
            SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );

        m.select(&mut s, 2);
        assert_eq!(
            m.select(&mut s, 1),
            SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );
        assert_eq!(m.phase(), Phase::OneRevealed { first: 2 });
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let (mut m, mut s) = machine();
        assert_eq!(
            m.select(&mut s, 12),
            SelectOutcome::Ignored(IgnoreReason::OutOfRange)
        );
    }

    #[test]
    fn test_timer_starts_only_once() {
        let (mut m, mut s) = machine();

        m.select(&mut s, 0);
        m.select(&mut s, 2);
        m.resolve_mismatch([0, 2]);
        s.timer_mut().tick();

        let outcome = m.select(&mut s, 4);
        assert_eq!(
            outcome,
            SelectOutcome::FirstReveal {
                index: 4,
                timer_started: false
            }
        );
        assert_eq!(s.elapsed_secs(), 1);
    }

    #[test]
    fn test_win_after_all_pairs_stops_timer() {
        let (mut m, mut s) = machine();

        for pair in 0..6 {
            let a = pair * 2;
            m.select(&mut s, a);
            let outcome = m.select(&mut s, a + 1);
            let expect_won = pair == 5;
            assert_eq!(
                outcome,
                SelectOutcome::Matched {
                    pair: [a, a + 1],
                    won: expect_won
                }
            );
            if !expect_won {
                s.timer_mut().tick();
            }
        }

        assert!(m.board().is_complete());
        assert_eq!(s.matched_pairs(), 6);
        assert_eq!(s.moves(), 6);
        assert!(!s.timer().is_running());
        assert_eq!(s.elapsed_secs(), 5);
        assert!(!s.timer_mut().tick());
        assert_eq!(s.elapsed_secs(), 5);
    }

    #[test]
    fn test_moves_count_only_comparisons() {
        let (mut m, mut s) = machine();

        // single pick, same tile, out of range: no move
        m.select(&mut s, 0);
        m.select(&mut s, 0);
        m.select(&mut s, 99);
        assert_eq!(s.moves(), 0);

        // mismatch, locked select, resolve, match
        m.select(&mut s, 2);
        m.select(&mut s, 7);
        m.resolve_mismatch([0, 2]);
        m.select(&mut s, 0);
        m.select(&mut s, 1);
        assert_eq!(s.moves(), 2);
    }
}
