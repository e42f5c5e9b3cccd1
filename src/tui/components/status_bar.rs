//! # StatusBar Component
//!
//! One line holding `App::status_message`. Color follows the message:
//! failures red, successes green, warnings and a pending delete yellow.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub message: &'a str,
    pub confirm_pending: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(message: &'a str, confirm_pending: bool) -> Self {
        Self {
            message,
            confirm_pending,
        }
    }

    fn style(&self) -> Style {
        if self.confirm_pending {
            return Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        if self.message.starts_with('❌') {
            Style::default().fg(Color::Red)
        } else if self.message.starts_with('✅') {
            Style::default().fg(Color::Green)
        } else if self.message.starts_with('⚠') {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(format!(" {}", self.message)).style(self.style());
        frame.render_widget(paragraph, area);
    }
}
