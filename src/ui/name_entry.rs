use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const MAX_NAME_LEN: usize = 20;

/// What a key press did to the name being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInput {
    Editing,
    /// Enter pressed; carries the raw text (possibly blank).
    Submitted(String),
}

/// Free-text input shown after a win.
#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    buffer: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NameInput {
        match key.code {
            KeyCode::Enter => NameInput::Submitted(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                NameInput::Editing
            }
            KeyCode::Esc => {
                self.buffer.clear();
                NameInput::Editing
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !c.is_control()
                    && self.buffer.chars().count() < MAX_NAME_LEN =>
            {
                self.buffer.push(c);
                NameInput::Editing
            }
            _ => NameInput::Editing,
        }
    }
}

/// Centred popup with the final figures and the name being typed.
pub fn render(frame: &mut Frame, entry: &NameEntry, moves: u32, seconds: u64, default_name: &str) {
    let area = frame.area();
    let width = 44u16.min(area.width);
    let height = 9u16.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let name_line = if entry.text().is_empty() {
        Span::styled(default_name, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            entry.text(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Moves: "),
            Span::styled(moves.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw("   Time: "),
            Span::styled(format!("{seconds}s"), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![Span::raw("Name: "), name_line, Span::raw("_")]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Save  |  Esc: Clear",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green))
            .title(" You matched them all! "),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
