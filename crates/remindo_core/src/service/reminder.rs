//! Reminder content derivation.
//!
//! # Responsibility
//! - Build `ReminderRequest` values from tasks and configuration.
//! - Pick the trigger time for each lifecycle transition.
//!
//! # Invariants
//! - Reminder bodies are single-line and capped at `body_max_chars` chars
//!   (plus a `...` marker when truncated).
//! - Re-scheduling never targets a due date at or before "now".

use crate::config::LifecycleConfig;
use crate::model::task::Task;
use crate::notify::service::ReminderRequest;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Builds the reminder request for one task.
pub fn reminder_request(config: &LifecycleConfig, task: &Task, trigger_at: i64) -> ReminderRequest {
    ReminderRequest {
        task_id: task.id,
        title: config.reminder_title.clone(),
        body: reminder_body(task.title.as_str(), config.body_max_chars),
        trigger_at,
    }
}

/// Collapses whitespace and caps the body length.
pub fn reminder_body(title: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_RE.replace_all(title.trim(), " ");
    let mut body = collapsed.chars().take(max_chars).collect::<String>();
    if collapsed.chars().count() > max_chars {
        body.push_str("...");
    }
    body
}

/// Trigger time for a freshly created task.
///
/// Dated tasks fire at their due date, or immediately when it already
/// passed. Undated tasks fire immediately when `remind_undated_on_create`
/// is set.
pub fn trigger_on_create(config: &LifecycleConfig, task: &Task, now: i64) -> Option<i64> {
    match task.due_at {
        Some(due_at) => Some(due_at.max(now)),
        None if config.remind_undated_on_create => Some(now),
        None => None,
    }
}

/// Trigger time when a task is reopened or its due date is edited.
///
/// Only open tasks with a due date strictly in the future get a reminder.
pub fn trigger_on_reschedule(task: &Task, now: i64) -> Option<i64> {
    if task.completed || !task.is_due_after(now) {
        return None;
    }
    task.due_at
}

#[cfg(test)]
mod tests {
    use super::{reminder_body, reminder_request, trigger_on_create, trigger_on_reschedule};
    use crate::config::LifecycleConfig;
    use crate::model::task::Task;

    #[test]
    fn body_collapses_whitespace_and_truncates() {
        assert_eq!(reminder_body("  buy\n\tmilk  ", 50), "buy milk");
        assert_eq!(reminder_body("abcdefgh", 4), "abcd...");
        assert_eq!(reminder_body("abcd", 4), "abcd");
    }

    #[test]
    fn request_uses_configured_title() {
        let config = LifecycleConfig {
            reminder_title: "Don't forget".to_string(),
            ..LifecycleConfig::default()
        };
        let task = Task::new("call mom", 0, Some(5_000)).expect("valid task");
        let request = reminder_request(&config, &task, 5_000);
        assert_eq!(request.task_id, task.id);
        assert_eq!(request.title, "Don't forget");
        assert_eq!(request.body, "call mom");
        assert_eq!(request.trigger_at, 5_000);
    }

    #[test]
    fn create_trigger_clamps_past_due_dates_to_now() {
        let config = LifecycleConfig::default();
        let past = Task::new("late", 0, Some(100)).expect("valid task");
        let future = Task::new("soon", 0, Some(900)).expect("valid task");
        assert_eq!(trigger_on_create(&config, &past, 500), Some(500));
        assert_eq!(trigger_on_create(&config, &future, 500), Some(900));
    }

    #[test]
    fn create_trigger_for_undated_task_follows_config() {
        let undated = Task::new("undated", 0, None).expect("valid task");
        let on = LifecycleConfig::default();
        let off = LifecycleConfig {
            remind_undated_on_create: false,
            ..LifecycleConfig::default()
        };
        assert_eq!(trigger_on_create(&on, &undated, 42), Some(42));
        assert_eq!(trigger_on_create(&off, &undated, 42), None);
    }

    #[test]
    fn reschedule_trigger_requires_open_task_with_future_due_date() {
        let mut task = Task::new("report", 0, Some(1_000)).expect("valid task");
        assert_eq!(trigger_on_reschedule(&task, 999), Some(1_000));
        assert_eq!(trigger_on_reschedule(&task, 1_000), None);

        task.completed = true;
        assert_eq!(trigger_on_reschedule(&task, 0), None);

        let undated = Task::new("undated", 0, None).expect("valid task");
        assert_eq!(trigger_on_reschedule(&undated, 0), None);
    }
}
