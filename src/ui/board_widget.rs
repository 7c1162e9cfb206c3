use crate::game::{Board, TileState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub const TILE_WIDTH: u16 = 11;
pub const TILE_HEIGHT: u16 = 3;

const HIDDEN_LABEL: &str = "?";

/// Placement of tiles inside a board area, shared by drawing and mouse
/// hit-testing so a click lands on the tile that was drawn there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    area: Rect,
    columns: usize,
    count: usize,
}

impl TileGrid {
    pub fn new(area: Rect, columns: usize, count: usize) -> Self {
        TileGrid {
            area,
            columns: columns.max(1),
            count,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns.min(self.count.max(1))
    }

    pub fn rows(&self) -> usize {
        self.count.div_ceil(self.columns)
    }

    /// Screen rectangle of tile `index`, centred in the area. `None` when the
    /// index is out of range or the tile would not fit on screen.
    pub fn tile_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.count {
            return None;
        }

        // u32 so that oversized decks clip instead of overflowing
        let (tile_w, tile_h) = (u32::from(TILE_WIDTH), u32::from(TILE_HEIGHT));
        let area_x = u32::from(self.area.x);
        let area_y = u32::from(self.area.y);
        let area_w = u32::from(self.area.width);
        let area_h = u32::from(self.area.height);

        let grid_width = clamp_u32(self.columns()).saturating_mul(tile_w);
        let grid_height = clamp_u32(self.rows()).saturating_mul(tile_h);
        let left = area_x + area_w.saturating_sub(grid_width) / 2;
        let top = area_y + area_h.saturating_sub(grid_height) / 2;

        let col = clamp_u32(index % self.columns);
        let row = clamp_u32(index / self.columns);
        let x = left.saturating_add(col.saturating_mul(tile_w));
        let y = top.saturating_add(row.saturating_mul(tile_h));

        let fits = x.saturating_add(tile_w) <= area_x + area_w
            && y.saturating_add(tile_h) <= area_y + area_h;
        if !fits {
            return None;
        }
        // x + width fits inside a u16 Rect, so both narrow losslessly
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        Some(Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT))
    }

    /// Tile under the terminal cell (`column`, `row`), if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        (0..self.count).find(|&index| {
            self.tile_rect(index).is_some_and(|r| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
        })
    }

    /// Index reached by moving the keyboard cursor by (`dx`, `dy`) cells,
    /// clamped to the grid.
    pub fn step(&self, from: usize, dx: isize, dy: isize) -> usize {
        if self.count == 0 {
            return 0;
        }
        let columns = self.columns as isize;
        let col = (from as isize % columns + dx).clamp(0, columns - 1);
        let row = (from as isize / columns + dy).clamp(0, self.rows() as isize - 1);
        let target = (row * columns + col) as usize;
        target.min(self.count - 1)
    }
}

fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Draw every tile of `board` into its grid slot. `cursor` is outlined.
pub fn render_tiles(frame: &mut Frame, board: &Board, grid: &TileGrid, cursor: Option<usize>) {
    for (index, tile) in board.tiles().iter().enumerate() {
        let Some(rect) = grid.tile_rect(index) else {
            continue;
        };

        let (label, style) = match tile.state() {
            TileState::Hidden => (
                HIDDEN_LABEL,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            TileState::Revealed => (
                tile.symbol(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            TileState::Matched => (tile.symbol(), Style::default().fg(Color::Green)),
        };

        let border_style = if cursor == Some(index) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let border_type = if tile.state() == TileState::Matched {
            BorderType::Double
        } else {
            BorderType::Rounded
        };

        let widget = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border_style),
            );
        frame.render_widget(widget, rect);
    }
}
