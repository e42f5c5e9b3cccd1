//! # Actions
//!
//! Every keystroke the editor cares about becomes an `Action`.
//! User presses Enter on the append row? That's `Action::Confirm`.
//! Types a character into the input line? `Action::TextInput(TextEdit::Insert(c))`.
//!
//! `update()` takes the current state and an action, applies it to
//! completion (including the blocking database call, if any), and returns
//! an `Effect` for the frontend to carry out.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Database writes are made before the row model is touched: a row is only
//! added, changed or removed once the store has accepted the change, so a
//! failed call leaves the table exactly as it was.

use log::{debug, info, warn};

use crate::core::parse::parse_line;
use crate::core::schema::{RecordId, Value};
use crate::core::state::{App, Mode};
use crate::db::GatewayError;

/// Longest free-text line accepted, in characters.
pub const INPUT_CHAR_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Paste(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Confirm,
    Cancel,
    Delete,
    Navigate(Direction),
    TextInput(TextEdit),
    /// Re-read every record from the store.
    Reload,
}

/// Side effects for the frontend. The core never touches the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: mode={:?} action={:?}", app.mode, action);

    if action == Action::Quit {
        // Every write is made as it happens; nothing is left to flush.
        info!("Quit requested in mode {:?}", app.mode);
        return Effect::Quit;
    }

    match app.mode {
        Mode::Browsing { confirm_pending } => browse(app, action, confirm_pending),
        Mode::Adding => add(app, action),
        Mode::Editing { index, id } => edit(app, action, index, id),
    }
    Effect::None
}

fn browse(app: &mut App, action: Action, confirm_pending: bool) {
    // Anything but a second Delete drops a pending confirmation.
    app.mode = Mode::default();

    match action {
        Action::Confirm if app.rows.cursor_on_sentinel() => {
            app.input.clear();
            app.mode = Mode::Adding;
            app.status_message = "✏️ Adding row. Enter new values:".to_string();
        }
        Action::Confirm => {
            let index = app.rows.cursor();
            let Some(id) = app.rows.record_id(index) else {
                warn!("Cursor {} has no record behind it", index);
                return;
            };
            app.input = app.rows.selected_row().join(",");
            app.mode = Mode::Editing { index, id };
            app.status_message = "✏️ Editing row. Enter new values:".to_string();
        }
        Action::Delete if confirm_pending => delete_selected(app),
        Action::Delete => {
            app.mode = Mode::Browsing {
                confirm_pending: true,
            };
            app.status_message = "Press backspace again to confirm deletion.".to_string();
        }
        Action::Navigate(direction) => navigate(app, direction),
        Action::Reload => reload(app),
        Action::Cancel | Action::TextInput(_) | Action::Quit => {}
    }
}

fn navigate(app: &mut App, direction: Direction) {
    let rows = &mut app.rows;
    match direction {
        Direction::Up => rows.move_up(1),
        Direction::Down => rows.move_down(1),
        Direction::PageUp => rows.move_up(app.page_size),
        Direction::PageDown => rows.move_down(app.page_size),
        Direction::Top => rows.set_cursor(0),
        Direction::Bottom => rows.set_cursor(rows.len() - 1),
    }
}

fn delete_selected(app: &mut App) {
    let cursor = app.rows.cursor();
    // The id comes from the row on screen, never from a positional re-read.
    let Some(id) = app.rows.record_id(cursor) else {
        app.status_message = "❌ Can't delete that row!".to_string();
        return;
    };

    match app.gateway.delete(id) {
        Ok(()) => {
            remove_row(app, cursor);
            info!("Deleted record {}", id);
            app.status_message = format!("✅ Row with ID {id} deleted successfully.");
        }
        Err(GatewayError::NotFound(_)) => {
            // Already gone from the store; drop the stale row to match.
            remove_row(app, cursor);
            warn!("Record {} was already deleted", id);
            app.status_message = format!("⚠️ Record {id} no longer existed; row removed.");
        }
        Err(e) => {
            warn!("Delete of record {} failed: {}", id, e);
            app.status_message = format!("❌ Error deleting record: {e}");
        }
    }
}

fn remove_row(app: &mut App, index: usize) {
    if let Err(e) = app.rows.remove_at(index) {
        warn!("Row {} could not be removed: {}", index, e);
    }
}

fn reload(app: &mut App) {
    match app.gateway.read_all() {
        Ok(records) => {
            app.rows.set_records(&records);
            info!("Reloaded {} records", records.len());
            app.status_message = format!("🔄 Reloaded {} records.", records.len());
        }
        Err(e) => {
            warn!("Reload failed: {}", e);
            app.status_message = format!("❌ Error reloading records: {e}");
        }
    }
}

fn add(app: &mut App, action: Action) {
    match action {
        Action::Confirm => {
            if let Some(values) = take_parsed_input(app) {
                match app.gateway.create(&values) {
                    Ok(id) => {
                        app.rows.insert_before_sentinel(id, cells(&values));
                        info!("Created record {}", id);
                        app.status_message = format!("✅ Created record with ID {id}");
                    }
                    Err(e) => {
                        warn!("Create failed: {}", e);
                        app.status_message = format!("❌ Error creating record: {e}");
                    }
                }
            }
        }
        Action::Cancel => {
            finish_input(app);
            app.status_message = "❌ Row addition cancelled.".to_string();
        }
        Action::TextInput(edit) => apply_text_edit(&mut app.input, edit),
        _ => {}
    }
}

fn edit(app: &mut App, action: Action, index: usize, id: RecordId) {
    match action {
        Action::Confirm => {
            if let Some(values) = take_parsed_input(app) {
                match app.gateway.update(id, &values) {
                    Ok(()) => {
                        // Resolve by id; fall back only if the row moved.
                        let position = if app.rows.record_id(index) == Some(id) {
                            Some(index)
                        } else {
                            app.rows.position_of(id)
                        };
                        match position.map(|pos| (pos, app.rows.replace_at(pos, cells(&values)))) {
                            Some((pos, Ok(()))) => {
                                app.rows.set_cursor(pos);
                                info!("Updated record {}", id);
                                app.status_message = "✅ Row updated successfully.".to_string();
                            }
                            _ => {
                                warn!("Record {} updated but its row is gone", id);
                                app.status_message =
                                    format!("⚠️ Record {id} updated; press r to reload.");
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Update of record {} failed: {}", id, e);
                        app.status_message = format!("❌ Error editing record: {e}");
                    }
                }
            }
        }
        Action::Cancel => {
            finish_input(app);
            app.status_message = "❌ Edit cancelled.".to_string();
        }
        Action::TextInput(edit) => apply_text_edit(&mut app.input, edit),
        _ => {}
    }
}

/// Leave the input mode and parse what was typed. On a parse error the status
/// shows why and `None` is returned; nothing else is touched.
fn take_parsed_input(app: &mut App) -> Option<Vec<Value>> {
    let input = std::mem::take(&mut app.input);
    finish_input(app);
    match parse_line(app.schema, &input) {
        Ok(values) => Some(values),
        Err(e) => {
            debug!("Rejected input {:?}: {}", input, e);
            app.status_message = e.status_message();
            None
        }
    }
}

fn finish_input(app: &mut App) {
    app.input.clear();
    app.mode = Mode::default();
}

fn cells(values: &[Value]) -> Vec<String> {
    values.iter().map(Value::display).collect()
}

fn apply_text_edit(input: &mut String, edit: TextEdit) {
    match edit {
        TextEdit::Insert(c) => push_limited(input, c),
        TextEdit::Paste(text) => text.chars().for_each(|c| push_limited(input, c)),
        TextEdit::Backspace => {
            input.pop();
        }
        TextEdit::Clear => input.clear(),
    }
}

fn push_limited(input: &mut String, c: char) {
    if !c.is_control() && input.chars().count() < INPUT_CHAR_LIMIT {
        input.push(c);
    }
}
