use tabledit::core::action::{Action, Direction, Effect, TextEdit, update};
use tabledit::core::parse::{ParseError, parse_line};
use tabledit::core::rows::RowError;
use tabledit::core::schema::{RecordId, Schema, Value};
use tabledit::core::state::{App, Mode};
use tabledit::db::memory::GatewayCall;
use tabledit::db::{Gateway, GatewayError, MemoryGateway};

// ============================================================================
// Helper Functions
// ============================================================================

fn people() -> MemoryGateway {
    MemoryGateway::with_rows(vec![
        vec![Value::Text("Alice".into()), Value::Integer(30)],
        vec![Value::Text("Bob".into()), Value::Integer(40)],
    ])
}

/// Load an app through the gateway, then forget the startup read.
fn load(gateway: &MemoryGateway, schema: Schema) -> App {
    let app = App::load(Box::new(gateway.clone()), schema, 7).unwrap();
    assert_eq!(gateway.calls(), vec![GatewayCall::ReadAll]);
    app
}

fn press(app: &mut App, actions: &[Action]) {
    for action in actions {
        assert_eq!(update(app, action.clone()), Effect::None);
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::TextInput(TextEdit::Insert(c)));
    }
}

fn snapshot(app: &App) -> Vec<Vec<String>> {
    app.rows.rows()
}

fn assert_cursor_in_bounds(app: &App) {
    assert!(app.rows.cursor() < app.rows.len());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn double_delete_removes_first_record() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);

    press(&mut app, &[Action::Delete, Action::Delete]);

    assert_eq!(
        snapshot(&app),
        vec![
            vec!["Bob".to_string(), "40".to_string()],
            Schema::Records.sentinel_cells(),
        ]
    );
    assert_eq!(app.rows.cursor(), 0);
    assert_eq!(app.status_message, "✅ Row with ID 1 deleted successfully.");

    let ids: Vec<RecordId> = gateway.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RecordId(2)]);
}

#[test]
fn add_from_sentinel_creates_record_and_selects_it() {
    let gateway = MemoryGateway::with_rows(vec![vec![
        Value::Integer(1),
        Value::Text("Ship".into()),
        Value::MonthDay(chrono::NaiveDate::from_ymd_opt(0, 3, 1).unwrap()),
    ]]);
    let mut app = load(&gateway, Schema::Todo);

    press(&mut app, &[Action::Navigate(Direction::Bottom), Action::Confirm]);
    assert_eq!(app.mode, Mode::Adding);
    type_text(&mut app, "5,Carol,06-22");
    press(&mut app, &[Action::Confirm]);

    assert_eq!(app.mode, Mode::default());
    assert_eq!(app.rows.data_len(), 2);
    assert_eq!(app.rows.cursor(), 1);
    assert_eq!(app.rows.selected_row(), vec!["5", "Carol", "06-22"]);
    assert!(app.rows.is_sentinel(2));
    assert_eq!(app.status_message, "✅ Created record with ID 2");
    assert_eq!(gateway.records().len(), 2);
}

#[test]
fn wrong_arity_while_adding_is_rejected() {
    let gateway = MemoryGateway::new();
    let mut app = load(&gateway, Schema::Todo);
    let before = snapshot(&app);

    press(&mut app, &[Action::Confirm]);
    type_text(&mut app, "abc,Dana");
    press(&mut app, &[Action::Confirm]);

    assert_eq!(
        app.status_message,
        "❌ Invalid input. Format: priority,task,due"
    );
    assert_eq!(snapshot(&app), before);
    assert_eq!(gateway.calls(), vec![GatewayCall::ReadAll]);
}

#[test]
fn wrong_type_while_adding_is_rejected() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);
    let before = snapshot(&app);

    press(&mut app, &[Action::Navigate(Direction::Bottom), Action::Confirm]);
    type_text(&mut app, "abc,Dana");
    press(&mut app, &[Action::Confirm]);

    assert!(app.status_message.starts_with("❌ Invalid age"));
    assert_eq!(snapshot(&app), before);
    assert_eq!(gateway.calls(), vec![GatewayCall::ReadAll]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn valid_lines_parse_to_schema_arity() {
    for (schema, line) in [
        (Schema::Records, "Carol,22"),
        (Schema::Records, "  Eve , 0 "),
        (Schema::Todo, "5,Carol,06-22"),
        (Schema::Todo, "-1, buy milk ,02-29"),
    ] {
        let values = parse_line(schema, line).unwrap();
        assert_eq!(values.len(), schema.arity(), "{line}");
    }
}

#[test]
fn wrong_field_count_is_a_mismatch() {
    for (schema, line) in [
        (Schema::Records, "Carol"),
        (Schema::Records, "Carol,22,x"),
        (Schema::Todo, "5,Carol"),
        (Schema::Todo, ""),
    ] {
        assert!(
            matches!(
                parse_line(schema, line),
                Err(ParseError::FieldCountMismatch { .. })
            ),
            "{line}"
        );
    }
}

#[test]
fn sentinel_cannot_be_replaced_or_removed() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);
    let sentinel = app.rows.sentinel_index();

    assert_eq!(app.rows.remove_at(sentinel), Err(RowError::CannotDeleteSentinel));
    assert!(matches!(
        app.rows.replace_at(sentinel, vec!["x".into(), "1".into()]),
        Err(RowError::OutOfRange { .. })
    ));

    press(
        &mut app,
        &[Action::Navigate(Direction::Bottom), Action::Delete, Action::Delete],
    );
    assert_eq!(app.status_message, "❌ Can't delete that row!");
    assert_eq!(app.rows.sentinel_index(), app.rows.len() - 1);
    assert_eq!(gateway.calls(), vec![GatewayCall::ReadAll]);
}

#[test]
fn deleted_record_is_gone_from_a_fresh_read() {
    let mut gateway = people();
    let mut app = load(&gateway, Schema::Records);
    let n = app.rows.len();

    press(
        &mut app,
        &[Action::Navigate(Direction::Down), Action::Delete, Action::Delete],
    );

    assert_eq!(app.rows.len(), n - 1);
    let ids: Vec<RecordId> = gateway.read_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RecordId(1)]);
}

#[test]
fn cursor_stays_in_bounds_through_deletes() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);

    // Delete the last data row: cursor lands on the new last row.
    press(&mut app, &[Action::Navigate(Direction::Down)]);
    press(&mut app, &[Action::Delete, Action::Delete]);
    assert_cursor_in_bounds(&app);
    assert_eq!(app.rows.cursor(), 1);
    assert!(app.rows.cursor_on_sentinel());

    press(&mut app, &[Action::Navigate(Direction::Top), Action::Delete, Action::Delete]);
    assert_cursor_in_bounds(&app);
    assert_eq!(app.rows.len(), 1);
    assert_eq!(app.rows.cursor(), 0);

    for direction in [
        Direction::Up,
        Direction::Down,
        Direction::PageDown,
        Direction::PageUp,
        Direction::Bottom,
    ] {
        press(&mut app, &[Action::Navigate(direction)]);
        assert_cursor_in_bounds(&app);
    }
}

#[test]
fn cancel_leaves_rows_and_store_untouched() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);
    let rows_before = snapshot(&app);
    let records_before = gateway.records();

    press(&mut app, &[Action::Confirm]);
    update(&mut app, Action::TextInput(TextEdit::Clear));
    type_text(&mut app, "Mallory,99");
    press(&mut app, &[Action::Cancel]);
    assert_eq!(app.status_message, "❌ Edit cancelled.");

    press(&mut app, &[Action::Navigate(Direction::Bottom), Action::Confirm]);
    type_text(&mut app, "Trent,50");
    press(&mut app, &[Action::Cancel]);
    assert_eq!(app.status_message, "❌ Row addition cancelled.");

    assert_eq!(snapshot(&app), rows_before);
    assert_eq!(gateway.records(), records_before);
    assert_eq!(gateway.calls(), vec![GatewayCall::ReadAll]);
}

#[test]
fn single_delete_only_arms_confirmation() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);

    press(&mut app, &[Action::Delete]);
    assert!(app.confirm_pending());
    assert_eq!(app.rows.data_len(), 2);

    // Any other key disarms it.
    press(&mut app, &[Action::Cancel, Action::Delete]);
    assert!(app.confirm_pending());
    press(&mut app, &[Action::Delete]);
    assert!(!app.confirm_pending());

    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::ReadAll, GatewayCall::Delete(RecordId(1))]
    );
}

#[test]
fn edit_targets_the_record_on_screen_after_earlier_deletes() {
    let gateway = MemoryGateway::with_rows(vec![
        vec![Value::Text("Alice".into()), Value::Integer(30)],
        vec![Value::Text("Bob".into()), Value::Integer(40)],
        vec![Value::Text("Carol".into()), Value::Integer(22)],
    ]);
    let mut app = load(&gateway, Schema::Records);

    // Remove Alice so every later row shifts up one position.
    press(&mut app, &[Action::Delete, Action::Delete]);
    press(&mut app, &[Action::Navigate(Direction::Down), Action::Confirm]);
    assert_eq!(app.input, "Carol,22");

    update(&mut app, Action::TextInput(TextEdit::Clear));
    type_text(&mut app, "Carol,23");
    press(&mut app, &[Action::Confirm]);

    assert_eq!(app.status_message, "✅ Row updated successfully.");
    assert_eq!(
        gateway.calls().last(),
        Some(&GatewayCall::Update(RecordId(3)))
    );
    let carol = gateway
        .records()
        .into_iter()
        .find(|r| r.id == RecordId(3))
        .unwrap();
    assert_eq!(carol.values[1], Value::Integer(23));
    assert_eq!(app.rows.selected_row(), vec!["Carol", "23"]);
}

#[test]
fn failed_create_leaves_rows_unchanged() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);
    let before = snapshot(&app);

    press(&mut app, &[Action::Navigate(Direction::Bottom), Action::Confirm]);
    type_text(&mut app, "Dave,31");
    gateway.fail_next(GatewayError::Query("disk full".into()));
    press(&mut app, &[Action::Confirm]);

    assert_eq!(
        app.status_message,
        "❌ Error creating record: query failed: disk full"
    );
    assert_eq!(snapshot(&app), before);
    assert_eq!(app.mode, Mode::default());
}

#[test]
fn delete_of_externally_removed_record_drops_row() {
    let mut gateway = people();
    let mut app = load(&gateway, Schema::Records);

    gateway.delete(RecordId(1)).unwrap();
    press(&mut app, &[Action::Delete, Action::Delete]);

    assert_eq!(
        app.status_message,
        "⚠️ Record 1 no longer existed; row removed."
    );
    assert_eq!(app.rows.data_len(), 1);
}

#[test]
fn reload_picks_up_external_writes() {
    let mut gateway = people();
    let mut app = load(&gateway, Schema::Records);

    gateway
        .create(&[Value::Text("Zed".into()), Value::Integer(9)])
        .unwrap();
    press(&mut app, &[Action::Reload]);

    assert_eq!(app.status_message, "🔄 Reloaded 3 records.");
    assert_eq!(app.rows.data_len(), 3);
    assert_eq!(app.rows.record_id(2), Some(RecordId(3)));
}

#[test]
fn quit_is_effective_from_every_mode() {
    let gateway = people();
    let mut app = load(&gateway, Schema::Records);
    assert_eq!(update(&mut app, Action::Quit), Effect::Quit);

    press(&mut app, &[Action::Confirm]);
    assert!(app.is_editing_text());
    assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
}
