use chrono::Utc;
use todo_core::{MutableTodo, Todo, TodoValidationError};
use uuid::Uuid;

#[test]
fn new_sets_defaults() {
    let todo = Todo::new("Buy milk").unwrap();

    assert!(!todo.id().is_nil());
    assert_eq!(todo.title(), "Buy milk");
    assert!(!todo.done());
    assert!(!todo.is_done());
    assert_eq!(todo.creation_date(), todo.modification_date());
    assert!(todo.creation_date() > 0);
}

#[test]
fn new_stamps_current_utc_time_in_millis() {
    let before = Utc::now().timestamp_millis();
    let todo = Todo::new("stamped").unwrap();
    let after = Utc::now().timestamp_millis();

    assert!(
        (before..=after).contains(&todo.creation_date()),
        "creation_date {} outside [{before}, {after}]",
        todo.creation_date()
    );

    let mut editable = todo.thaw();
    editable.set_done(true);
    assert!(editable.modification_date() <= Utc::now().timestamp_millis());
}

#[test]
fn new_keeps_title_verbatim() {
    for title in ["x", "  padded  ", "emoji ✓", "multi\nline"] {
        assert_eq!(Todo::new(title).unwrap().title(), title);
    }
}

#[test]
fn new_rejects_empty_or_blank_title() {
    assert_eq!(Todo::new("").unwrap_err(), TodoValidationError::EmptyTitle);
    assert_eq!(Todo::new(" \t").unwrap_err(), TodoValidationError::EmptyTitle);
}

#[test]
fn from_parts_enforces_invariants() {
    let id = Uuid::new_v4();

    assert_eq!(
        Todo::from_parts(Uuid::nil(), "a", false, 1, 1).unwrap_err(),
        TodoValidationError::NilId
    );
    assert_eq!(
        Todo::from_parts(id, "a", false, 200, 100).unwrap_err(),
        TodoValidationError::ModifiedBeforeCreated {
            created: 200,
            modified: 100,
        }
    );

    let todo = Todo::from_parts(id, "a", true, 100, 200).unwrap();
    assert_eq!(todo.id(), id);
    assert!(todo.done());
    assert_eq!(todo.creation_date(), 100);
    assert_eq!(todo.modification_date(), 200);
}

#[test]
fn thaw_returns_independent_copy() {
    let todo = Todo::new("original").unwrap();
    let mut editable = todo.thaw();
    assert_eq!(editable.freeze(), todo);

    editable.set_title("edited").unwrap();
    editable.set_done(true);

    assert_eq!(todo.title(), "original");
    assert!(!todo.done());
    assert_eq!(editable.title(), "edited");
    assert_eq!(editable.id(), todo.id());
}

#[test]
fn set_done_refreshes_modification_date() {
    let todo = Todo::new("Buy milk").unwrap();
    let mut editable = todo.to_mutable_copy();
    let before = editable.modification_date();

    editable.set_done(true);

    assert!(editable.done());
    assert!(editable.modification_date() >= before);
}

#[test]
fn every_setter_advances_modification_date_over_time() {
    let mut editable = MutableTodo::new("slow").unwrap();
    let created = editable.modification_date();

    std::thread::sleep(std::time::Duration::from_millis(5));
    editable.set_done(false);
    let after_done = editable.modification_date();
    assert!(after_done > created, "unchanged value must still refresh");

    std::thread::sleep(std::time::Duration::from_millis(5));
    editable.set_title("slow").unwrap();
    assert!(editable.modification_date() > after_done);
}

#[test]
fn creation_date_survives_any_mutation_sequence() {
    let todo = Todo::new("stable").unwrap();
    let mut editable = todo.thaw();

    for step in 0..20 {
        editable.set_done(step % 2 == 0);
        editable.set_title(format!("title {step}")).unwrap();
        assert_eq!(editable.creation_date(), todo.creation_date());
        assert!(editable.modification_date() >= editable.creation_date());
    }
}

#[test]
fn rejected_title_leaves_todo_untouched() {
    let mut editable = MutableTodo::new("keep me").unwrap();
    let snapshot = editable.freeze();

    assert_eq!(
        editable.set_title("   ").unwrap_err(),
        TodoValidationError::EmptyTitle
    );
    assert_eq!(editable.to_immutable_copy(), snapshot);
}

#[test]
fn from_conversions_mirror_thaw_and_freeze() {
    let todo = Todo::new("convert").unwrap();
    let editable = MutableTodo::from(todo.clone());
    let back = Todo::from(editable);
    assert_eq!(back, todo);
}

#[test]
fn serde_uses_snake_case_fields_and_validates_on_read() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let todo = Todo::from_parts(id, "ship it", true, 1_700_000_000_000, 1_700_000_360_000).unwrap();

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "ship it");
    assert_eq!(json["done"], true);
    assert_eq!(json["creation_date"], 1_700_000_000_000_i64);
    assert_eq!(json["modification_date"], 1_700_000_360_000_i64);
    assert_eq!(serde_json::from_value::<Todo>(json).unwrap(), todo);

    let bad = serde_json::json!({
        "id": id.to_string(),
        "title": "late",
        "done": false,
        "creation_date": 200,
        "modification_date": 100
    });
    let err = serde_json::from_value::<Todo>(bad).unwrap_err();
    assert!(
        err.to_string()
            .contains("modification_date (100) must be >= creation_date (200)"),
        "unexpected error: {err}"
    );
}
