//! # Core Application Logic
//!
//! The table-editing state machine. It knows nothing about any specific UI
//! technology; the database is reached only through the `Gateway` handle it
//! is given.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (key events)  │
//!                    │  • update() (reducer)   │
//!                    │  • parse / rows         │
//!                    └─────┬─────────────┬─────┘
//!                          │             │
//!                          ▼             ▼
//!                   ┌────────────┐ ┌────────────┐
//!                   │    TUI     │ │  Gateway   │
//!                   │  Adapter   │ │ (postgres/ │
//!                   │ (ratatui)  │ │  memory)   │
//!                   └────────────┘ └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the interaction `Mode`
//! - [`action`]: The `Action` enum and `update()`
//! - [`rows`]: Visible rows, the append row, and the row → record id map
//! - [`parse`]: Free-text line → typed values
//! - [`schema`]: Table and column definitions, typed values
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod parse;
pub mod rows;
pub mod schema;
pub mod state;
