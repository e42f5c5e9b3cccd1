//! # InputBox Component
//!
//! Single-line field for the comma-separated row text while adding or
//! editing. The buffer itself lives in `App::input`; this component only
//! draws it.
//!
//! The cursor always sits at the end of the text. When the text is wider
//! than the box, the tail is shown so the cursor stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::Component;

/// Borders on each side
const HORIZONTAL_OVERHEAD: u16 = 2;

pub struct InputBox<'a> {
    /// Current buffer (prop from App)
    pub text: &'a str,
    /// Block title, e.g. "Add row" or "Edit row 2"
    pub title: String,
    /// Expected format, shown greyed out while the buffer is empty
    pub placeholder: String,
}

impl<'a> InputBox<'a> {
    pub fn new(text: &'a str, title: String, placeholder: String) -> Self {
        Self {
            text,
            title,
            placeholder,
        }
    }
}

/// Longest suffix of `text` that fits in `width` columns, plus its width.
///
/// One column is kept free for the cursor.
pub(crate) fn visible_tail(text: &str, width: u16) -> (&str, u16) {
    let budget = width.saturating_sub(1) as usize;
    let mut used = 0usize;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = i;
    }
    (&text[start..], used as u16)
}

impl Component for InputBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let (visible, cursor_offset) = visible_tail(self.text, inner_width);

        let paragraph = if self.text.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(visible).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(paragraph.block(block), area);
        frame.set_cursor_position((area.x + 1 + cursor_offset, area.y + 1));
    }
}
