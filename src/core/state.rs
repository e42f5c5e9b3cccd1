//! # Application State
//!
//! Everything the editor knows, in one struct. No terminal types live here;
//! presentation state belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── gateway: Box<dyn Gateway>   // the one database handle
//! ├── schema: Schema              // which table, which columns
//! ├── rows: RowModel              // visible rows + cursor + record ids
//! ├── mode: Mode                  // browsing / adding / editing
//! ├── input: String               // free-text line while adding/editing
//! ├── status_message: String      // status line text
//! └── page_size: usize            // rows moved by PageUp/PageDown
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use crate::core::rows::RowModel;
use crate::core::schema::{Record, RecordId, Schema};
use crate::db::{Gateway, GatewayResult};

/// Interaction mode. Exactly one is active; delete confirmation only exists
/// while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing { confirm_pending: bool },
    Adding,
    /// Editing the row that was at `index` when editing began and that
    /// mirrors record `id`.
    Editing { index: usize, id: RecordId },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Browsing {
            confirm_pending: false,
        }
    }
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Browsing { confirm_pending: false } => "BROWSE",
            Mode::Browsing { confirm_pending: true } => "CONFIRM DELETE",
            Mode::Adding => "ADD",
            Mode::Editing { .. } => "EDIT",
        }
    }
}

pub struct App {
    pub gateway: Box<dyn Gateway>,
    pub schema: Schema,
    pub rows: RowModel,
    pub mode: Mode,
    pub input: String,
    pub status_message: String,
    pub page_size: usize,
}

impl App {
    pub fn new(
        gateway: Box<dyn Gateway>,
        schema: Schema,
        records: Vec<Record>,
        page_size: usize,
    ) -> Self {
        let status_message = format!("Loaded {} records from {}", records.len(), schema);
        Self {
            gateway,
            schema,
            rows: RowModel::new(schema, &records),
            mode: Mode::default(),
            input: String::new(),
            status_message,
            page_size: page_size.max(1),
        }
    }

    /// Read every stored record and start browsing them.
    pub fn load(
        mut gateway: Box<dyn Gateway>,
        schema: Schema,
        page_size: usize,
    ) -> GatewayResult<Self> {
        let records = gateway.read_all()?;
        Ok(Self::new(gateway, schema, records, page_size))
    }

    /// True while keystrokes are being typed into the free-text line.
    pub fn is_editing_text(&self) -> bool {
        matches!(self.mode, Mode::Adding | Mode::Editing { .. })
    }

    pub fn confirm_pending(&self) -> bool {
        matches!(
            self.mode,
            Mode::Browsing {
                confirm_pending: true
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{people_app, people_gateway};

    #[test]
    fn test_app_new_defaults() {
        let app = people_app();
        assert_eq!(app.mode, Mode::default());
        assert!(!app.is_editing_text());
        assert!(!app.confirm_pending());
        assert!(app.input.is_empty());
        assert_eq!(app.rows.len(), 3);
        assert_eq!(app.rows.cursor(), 0);
        assert_eq!(app.status_message, "Loaded 2 records from records");
    }

    #[test]
    fn test_load_reads_store_once() {
        let gateway = people_gateway();
        let app = App::load(Box::new(gateway.clone()), Schema::Records, 7).unwrap();
        assert_eq!(app.rows.data_len(), 2);
        assert_eq!(gateway.calls().len(), 1);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let gateway = people_gateway();
        gateway.fail_next(crate::db::GatewayError::Connect("refused".into()));
        assert!(App::load(Box::new(gateway), Schema::Records, 7).is_err());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::default().label(), "BROWSE");
        assert_eq!(
            Mode::Browsing { confirm_pending: true }.label(),
            "CONFIRM DELETE"
        );
        assert_eq!(Mode::Adding.label(), "ADD");
    }
}
