use remindo_core::{NotificationHandle, Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("  Buy milk  ", 1_700_000_000_000, None).unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.created_at, 1_700_000_000_000);
    assert_eq!(task.due_at, None);
    assert_eq!(task.notification_id, None);
    assert!(!task.has_reminder());
}

#[test]
fn task_new_rejects_blank_titles() {
    for title in ["", "   ", "\n\t"] {
        let err = Task::new(title, 0, None).unwrap_err();
        assert_eq!(err, TaskValidationError::BlankTitle);
    }
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "invalid", 0, None).unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::with_id(task_id, "Buy milk", 1_700_000_000_000, Some(1_700_000_360_000))
        .unwrap();
    task.notification_id = NotificationHandle::new("reminder-1");

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["completed"], false);
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["due_at"], 1_700_000_360_000_i64);
    assert_eq!(json["notification_id"], "reminder-1");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_rejects_reminder_on_completed_task() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "done already",
        "completed": true,
        "created_at": 0,
        "due_at": null,
        "notification_id": "reminder-3"
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("completed task cannot hold a scheduled reminder"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_blank_notification_handle() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "open",
        "completed": false,
        "created_at": 0,
        "due_at": null,
        "notification_id": "  "
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}
