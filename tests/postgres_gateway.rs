//! Live Postgres checks. Ignored by default; run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.
//!
//! Each test clears its table first, so point them at a scratch database.

use chrono::NaiveDate;
use tabledit::core::schema::{Schema, Value};
use tabledit::db::{Gateway, GatewayError, PgGateway};

fn connect(schema: Schema) -> Option<PgGateway> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let mut gateway = PgGateway::connect(&url, schema).unwrap();
    gateway.clear_all().unwrap();
    Some(gateway)
}

#[test]
#[ignore]
fn records_crud_round_trip() {
    let Some(mut gateway) = connect(Schema::Records) else {
        return;
    };

    let alice = gateway
        .create(&[Value::Text("Alice".into()), Value::Integer(30)])
        .unwrap();
    let bob = gateway
        .create(&[Value::Text("Bob".into()), Value::Integer(40)])
        .unwrap();
    assert!(bob > alice);

    gateway
        .update(alice, &[Value::Text("Alicia".into()), Value::Integer(31)])
        .unwrap();
    gateway.delete(bob).unwrap();

    let records = gateway.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, alice);
    assert_eq!(records[0].cells(), vec!["Alicia", "31"]);

    // Already deleted
    assert_eq!(gateway.delete(bob), Err(GatewayError::NotFound(bob)));
    assert_eq!(
        gateway.update(bob, &[Value::Text("Bob".into()), Value::Integer(41)]),
        Err(GatewayError::NotFound(bob))
    );
}

#[test]
#[ignore]
fn todo_due_dates_survive_storage() {
    let Some(mut gateway) = connect(Schema::Todo) else {
        return;
    };

    let leap_day = NaiveDate::from_ymd_opt(0, 2, 29).unwrap();
    let id = gateway
        .create(&[
            Value::Integer(1),
            Value::Text("File taxes".into()),
            Value::MonthDay(leap_day),
        ])
        .unwrap();

    let records = gateway.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].values[2], Value::MonthDay(leap_day));
    assert_eq!(records[0].cells(), vec!["1", "File taxes", "02-29"]);
}
