//! # TUI Components
//!
//! UI pieces for the table editor.
//!
//! ## Component Architecture
//!
//! All components are transient: they are built each frame from borrowed
//! `App` data ("props") and rendered once. Anything that must survive between
//! frames, such as the table's scroll offset, lives in `TuiState` and is
//! borrowed mutably by the wrapper that needs it.
//!
//! - `TitleBar`: table name, record count, mode
//! - `RecordTable`: header, data rows, append row, selection
//! - `StatusBar`: status line colored by outcome
//! - `InputBox`: comma-separated row text while adding or editing
//!
//! Key handling does not live here. Keys become `Action`s in `tui::event`
//! and only `core::action::update` changes state.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── record_table.rs
//! ├── status_bar.rs
//! └── input_box.rs
//! ```

mod input_box;
mod record_table;
mod status_bar;
mod title_bar;

pub use input_box::InputBox;
pub use record_table::RecordTable;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
