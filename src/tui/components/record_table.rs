//! # RecordTable Component
//!
//! The table itself: one header row from the schema's column titles, one
//! line per data row, and the dimmed append row at the bottom.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TableState` lives in `TuiState` (keeps the scroll offset between frames)
//! - `RecordTable` is created each frame with borrowed state and rows

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Row, Table, TableState};

use crate::core::rows::RowModel;
use crate::core::schema::Schema;
use crate::tui::component::Component;

pub struct RecordTable<'a> {
    pub schema: Schema,
    pub rows: &'a RowModel,
    /// False while the input line has focus; the selection is then dimmed
    pub focused: bool,
    state: &'a mut TableState,
}

impl<'a> RecordTable<'a> {
    pub fn new(schema: Schema, rows: &'a RowModel, focused: bool, state: &'a mut TableState) -> Self {
        Self {
            schema,
            rows,
            focused,
            state,
        }
    }
}

impl Component for RecordTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = self.schema.columns();
        let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width)).collect();

        let header = Row::new(columns.iter().map(|c| c.title))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let sentinel = self.rows.sentinel_index();
        let rows = self.rows.rows().into_iter().enumerate().map(|(i, cells)| {
            let row = Row::new(cells);
            if i == sentinel {
                row.style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            } else {
                row
            }
        });

        let highlight = if self.focused {
            Style::default().fg(Color::Indexed(229)).bg(Color::Indexed(57))
        } else {
            Style::default().add_modifier(Modifier::DIM | Modifier::REVERSED)
        };

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(highlight)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Indexed(240))),
            );

        self.state.select(Some(self.rows.cursor()));
        frame.render_stateful_widget(table, area, self.state);
    }
}
