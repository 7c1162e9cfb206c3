use std::collections::{HashMap, HashSet};

use rand::Rng;

use super::shuffle::shuffle;
use crate::error::BoardError;

/// Face values of the stock deck.
pub const DEFAULT_SYMBOLS: [&str; 6] = ["Ryu", "Ken", "ChunLi", "Guile", "Blanka", "E.Honda"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    symbol: String,
    state: TileState,
}

impl Tile {
    pub fn new(symbol: impl Into<String>) -> Self {
        Tile {
            symbol: symbol.into(),
            state: TileState::Hidden,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    /// Whether the face is currently visible (revealed or matched).
    pub fn is_face_up(&self) -> bool {
        self.state != TileState::Hidden
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }
}

/// A validated set of distinct, non-blank symbols. Each one becomes a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    symbols: Vec<String>,
}

impl Deck {
    pub fn new<I, S>(symbols: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(BoardError::EmptyDeck);
        }

        let mut seen = HashSet::new();
        for (position, symbol) in symbols.iter().enumerate() {
            if symbol.trim().is_empty() {
                return Err(BoardError::BlankSymbol(position));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(BoardError::DuplicateSymbol(symbol.clone()));
            }
        }

        Ok(Deck { symbols })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of pairs a board built from this deck holds.
    pub fn pairs(&self) -> usize {
        self.symbols.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered sequence of 2N tiles in which every symbol appears exactly twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    pairs: usize,
}

impl Board {
    /// Lay out two tiles per deck symbol and shuffle them.
    pub fn shuffled<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Self {
        let mut tiles: Vec<Tile> = deck
            .symbols()
            .iter()
            .flat_map(|symbol| [Tile::new(symbol.as_str()), Tile::new(symbol.as_str())])
            .collect();
        shuffle(&mut tiles, rng);

        Board {
            tiles,
            pairs: deck.pairs(),
        }
    }

    /// Build a board with a fixed tile order, checking the pairing invariant.
    pub fn from_layout<S: AsRef<str>>(layout: &[S]) -> Result<Self, BoardError> {
        if layout.is_empty() {
            return Err(BoardError::EmptyDeck);
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (position, symbol) in layout.iter().enumerate() {
            let symbol = symbol.as_ref();
            if symbol.trim().is_empty() {
                return Err(BoardError::BlankSymbol(position));
            }
            *counts.entry(symbol).or_default() += 1;
        }

        for symbol in layout.iter().map(AsRef::as_ref) {
            match counts[symbol] {
                2 => {}
                1 => return Err(BoardError::UnpairedSymbol(symbol.to_string())),
                _ => return Err(BoardError::DuplicateSymbol(symbol.to_string())),
            }
        }

        Ok(Board {
            tiles: layout.iter().map(|s| Tile::new(s.as_ref())).collect(),
            pairs: counts.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of distinct symbols on the board.
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn set_state(&mut self, index: usize, state: TileState) {
        self.tiles[index].set_state(state);
    }

    /// Count of tiles in the given state.
    pub fn count(&self, state: TileState) -> usize {
        self.tiles.iter().filter(|t| t.state() == state).count()
    }

    /// True once every tile has been matched.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(|t| t.state() == TileState::Matched)
    }
}
