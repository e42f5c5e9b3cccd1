//! # TitleBar Component
//!
//! Top bar showing which table is open, how many records it holds, and the
//! current interaction mode.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("todo", 3, "BROWSE");
//! title_bar.render(frame, area);
//! ```
//!
//! The mode label is right-aligned when there is room, so it stays in the
//! same place while the table name and count change.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub struct TitleBar<'a> {
    /// Table being edited (e.g., "todo")
    pub table_name: &'a str,
    /// Stored records, not counting the append row
    pub record_count: usize,
    /// Mode label (e.g., "BROWSE", "EDIT")
    pub mode_label: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(table_name: &'a str, record_count: usize, mode_label: &'a str) -> Self {
        Self {
            table_name,
            record_count,
            mode_label,
        }
    }

    fn left_text(&self) -> String {
        let noun = if self.record_count == 1 { "record" } else { "records" };
        format!(
            " tabledit | {} ({} {})",
            self.table_name, self.record_count, noun
        )
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = self.left_text();
        let right = format!("[{}] ", self.mode_label);

        let used = left.width() + right.width();
        let gap = (area.width as usize).saturating_sub(used).max(1);

        let line = Line::from(vec![
            Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(Color::Yellow)),
        ]);

        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
            area,
        );
    }
}
