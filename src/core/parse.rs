//! # Input Parser
//!
//! Turns one comma-separated free-text line into typed values for a schema.
//! Parsing is pure: callers mutate rows or touch the database only after a
//! line has parsed successfully.

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::schema::{Column, FieldKind, MAX_TEXT_LEN, MONTH_DAY_YEAR, Schema, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} fields ({format}), found {found}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        format: String,
    },
    #[error("invalid {field}: {cause}")]
    FieldType { field: &'static str, cause: String },
}

impl ParseError {
    /// Status-line text for a rejected line.
    pub fn status_message(&self) -> String {
        match self {
            ParseError::FieldCountMismatch { format, .. } => {
                format!("❌ Invalid input. Format: {format}")
            }
            ParseError::FieldType { field, cause } => format!("❌ Invalid {field}: {cause}"),
        }
    }
}

/// Parse `input` against `schema`. Fields are split on `,` and trimmed; there
/// is no escaping, so text fields cannot contain commas.
pub fn parse_line(schema: Schema, input: &str) -> Result<Vec<Value>, ParseError> {
    let fields: Vec<&str> = input.trim().split(',').map(str::trim).collect();
    let columns = schema.columns();

    if fields.len() != columns.len() {
        return Err(ParseError::FieldCountMismatch {
            expected: columns.len(),
            found: fields.len(),
            format: schema.input_format(),
        });
    }

    columns
        .iter()
        .zip(fields)
        .map(|(column, raw)| parse_field(column, raw))
        .collect()
}

fn parse_field(column: &Column, raw: &str) -> Result<Value, ParseError> {
    let type_error = |cause: String| ParseError::FieldType {
        field: column.name,
        cause,
    };

    match column.kind {
        FieldKind::Integer => raw
            .parse::<i32>()
            .map(Value::Integer)
            .map_err(|e| type_error(format!("{raw:?}: {e}"))),
        FieldKind::Text => {
            let len = raw.chars().count();
            if len > MAX_TEXT_LEN {
                return Err(type_error(format!(
                    "{len} characters exceeds the {MAX_TEXT_LEN} character limit"
                )));
            }
            Ok(Value::Text(raw.to_string()))
        }
        FieldKind::MonthDay => parse_month_day(raw).map(Value::MonthDay).map_err(type_error),
    }
}

/// Strict `MM-DD`: two digits each side, valid day for the month.
fn parse_month_day(raw: &str) -> Result<NaiveDate, String> {
    let expected = || format!("{raw:?} is not a date in MM-DD form");

    let (month, day) = raw.split_once('-').ok_or_else(expected)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(month) || !two_digits(day) {
        return Err(expected());
    }

    let month: u32 = month.parse().map_err(|_| expected())?;
    let day: u32 = day.parse().map_err(|_| expected())?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month:02} out of range"));
    }
    NaiveDate::from_ymd_opt(MONTH_DAY_YEAR, month, day)
        .ok_or_else(|| format!("day {day:02} out of range for month {month:02}"))
}
