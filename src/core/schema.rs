//! # Table Schemas
//!
//! Describes the two tables the editor knows how to drive. A schema owns the
//! table name, the ordered columns (which double as the free-text field
//! order), and the placeholder cells of the trailing "append" row.
//!
//! ```text
//! records: name (text), age (integer)
//! todo:    priority (integer), task (text), due (MM-DD)
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Year every `MM-DD` value is pinned to. Year 0 is a leap year, so `02-29`
/// is a valid due date.
pub const MONTH_DAY_YEAR: i32 = 0;

/// Maximum stored length of a text field (`VARCHAR(100)`).
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// People table: name, age.
    Records,
    /// Todo list: priority, task, due date.
    #[default]
    Todo,
}

/// How a single free-text field is parsed, stored and displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    MonthDay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// SQL column name
    pub name: &'static str,
    /// Header shown above the table
    pub title: &'static str,
    /// Display width in cells
    pub width: u16,
    pub kind: FieldKind,
}

const RECORDS_COLUMNS: &[Column] = &[
    Column { name: "name", title: "Name", width: 20, kind: FieldKind::Text },
    Column { name: "age", title: "Age", width: 5, kind: FieldKind::Integer },
];

const TODO_COLUMNS: &[Column] = &[
    Column { name: "priority", title: "Priority", width: 9, kind: FieldKind::Integer },
    Column { name: "task", title: "Task", width: 13, kind: FieldKind::Text },
    Column { name: "due", title: "Due", width: 5, kind: FieldKind::MonthDay },
];

impl Schema {
    pub fn table_name(self) -> &'static str {
        match self {
            Schema::Records => "records",
            Schema::Todo => "todo",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            Schema::Records => RECORDS_COLUMNS,
            Schema::Todo => TODO_COLUMNS,
        }
    }

    /// Number of fields a free-text line must contain.
    pub fn arity(self) -> usize {
        self.columns().len()
    }

    /// Comma-joined column names, e.g. `priority,task,due`.
    pub fn input_format(self) -> String {
        self.columns()
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this schema.
    pub fn create_table_sql(self) -> &'static str {
        match self {
            Schema::Records => {
                "CREATE TABLE IF NOT EXISTS records (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(100),
                    age INT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )"
            }
            Schema::Todo => {
                "CREATE TABLE IF NOT EXISTS todo (
                    id INT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
                    priority INT,
                    task VARCHAR(100),
                    due TIMESTAMP
                )"
            }
        }
    }

    /// Cells of the trailing append row, padded to the schema's arity.
    pub fn sentinel_cells(self) -> Vec<String> {
        let mut cells = vec!["...".to_string(), "Add New Row".to_string()];
        cells.resize(self.arity().max(2), String::new());
        cells
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Persistence-assigned identifier. The only key shared between a row on
/// screen and the stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub i32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single typed field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Integer(i32),
    Text(String),
    MonthDay(NaiveDate),
}

impl Value {
    /// Canonical cell text for this value.
    pub fn display(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::MonthDay(date) => date.format("%m-%d").to_string(),
        }
    }

    /// Midnight timestamp for a `MonthDay`, as stored in a `TIMESTAMP` column.
    pub fn month_day_timestamp(date: NaiveDate) -> NaiveDateTime {
        date.and_time(chrono::NaiveTime::MIN)
    }

    /// Re-pin a stored timestamp to the canonical month-day year.
    pub fn month_day_from_timestamp(ts: NaiveDateTime) -> Option<NaiveDate> {
        let date = ts.date();
        NaiveDate::from_ymd_opt(MONTH_DAY_YEAR, date.month(), date.day())
    }
}

/// A persisted entity: identifier plus one value per schema column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub values: Vec<Value>,
}

impl Record {
    pub fn cells(&self) -> Vec<String> {
        self.values.iter().map(Value::display).collect()
    }
}
