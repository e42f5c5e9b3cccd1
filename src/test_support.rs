//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{Action, TextEdit, update};
use crate::core::schema::{Schema, Value};
use crate::core::state::App;
use crate::db::MemoryGateway;

/// Alice (30) and Bob (40) stored as ids 1 and 2.
pub fn people_gateway() -> MemoryGateway {
    MemoryGateway::with_rows(vec![
        vec![Value::Text("Alice".into()), Value::Integer(30)],
        vec![Value::Text("Bob".into()), Value::Integer(40)],
    ])
}

/// Browsing app over `gateway`, plus a handle for inspecting the store.
/// The initial load is not left in the call log.
pub fn people_app_with(gateway: MemoryGateway) -> (App, MemoryGateway) {
    let records = gateway.records();
    let app = App::new(Box::new(gateway.clone()), Schema::Records, records, 7);
    (app, gateway)
}

pub fn people_app() -> App {
    people_app_with(people_gateway()).0
}

/// Feed `text` to the app one character at a time.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::TextInput(TextEdit::Insert(c)));
    }
}
