use crate::core::state::{App, Mode};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputBox, RecordTable, StatusBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Rows used by the table block besides data: borders plus header and its margin
const TABLE_CHROME: u16 = 4;
const INPUT_HEIGHT: u16 = 3;

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "move"),
    ("Enter", "edit/add"),
    ("Bksp", "delete"),
    ("r", "reload"),
    ("q", "quit"),
];

const TEXT_HINTS: &[(&str, &str)] = &[
    ("Enter", "save"),
    ("Esc", "cancel"),
    ("Ctrl+U", "clear"),
    ("Ctrl+C", "quit"),
];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Max, Min};

    let editing = app.is_editing_text();
    let table_height = tui.table_height.saturating_add(TABLE_CHROME);
    let input_height = if editing { INPUT_HEIGHT } else { 0 };

    let layout = Layout::vertical([
        Length(1),
        Max(table_height),
        Length(1),
        Length(input_height),
        Min(0),
        Length(1),
    ]);
    let [title_area, table_area, status_area, input_area, _spacer, hint_area] =
        layout.areas(frame.area());

    TitleBar::new(app.schema.table_name(), app.rows.data_len(), app.mode.label())
        .render(frame, title_area);

    RecordTable::new(app.schema, &app.rows, !editing, &mut tui.table_state)
        .render(frame, table_area);

    StatusBar::new(&app.status_message, app.confirm_pending()).render(frame, status_area);

    if editing {
        let title = match app.mode {
            Mode::Editing { id, .. } => format!("Edit record {}", id),
            _ => "Add row".to_string(),
        };
        InputBox::new(&app.input, title, app.schema.input_format()).render(frame, input_area);
    }

    draw_hints(frame, hint_area, if editing { TEXT_HINTS } else { BROWSE_HINTS });
}

fn draw_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let key_style = Style::default().fg(Color::Cyan);
    let desc_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", desc_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}", desc), desc_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
