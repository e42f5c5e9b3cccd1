//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event arrived (including terminal resize). All
//! pending events are drained before the next frame so held keys don't lag.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::widgets::TableState;

use crate::core::action::{Effect, update};
use crate::core::state::App;
use crate::tui::event::{poll_event_immediate, poll_event_timeout, to_action};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Selection and scroll offset of the table
    pub table_state: TableState,
    /// Data rows visible at once
    pub table_height: u16,
}

impl TuiState {
    pub fn new(table_height: u16) -> Self {
        Self {
            table_state: TableState::default(),
            table_height: table_height.max(1),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // REPORT_EVENT_TYPES lets held keys arrive as Repeat; terminals
        // without the protocol ignore it.
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run the editor until the user quits.
///
/// The terminal is restored on every exit path, including errors.
pub fn run(app: &mut App, table_height: u16) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut tui = TuiState::new(table_height);
        event_loop(&mut terminal, app, &mut tui)
    });
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL)?;
        if first_event.is_none() {
            continue;
        }
        needs_redraw = true;

        let mut pending = first_event;
        while let Some(event) = pending {
            if let Some(action) = to_action(&event, app.is_editing_text())
                && update(app, action) == Effect::Quit
            {
                debug!("Leaving event loop");
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}
