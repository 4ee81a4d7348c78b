//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task lifecycle to Dart via FRB.
//! - Hand queued reminder commands to the native notification plugin.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One lifecycle manager and one outbox exist per process.
//! - Task ids cross the boundary as hyphenated UUID strings.

use log::warn;
use remindo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    LifecycleConfig, NotificationCommand, OutboxNotificationService, PermissionStatus,
    SystemClock, Task, TaskId, TaskLifecycleManager, TaskSummary,
};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

static OUTBOX: OnceLock<Arc<OutboxNotificationService>> = OnceLock::new();
static MANAGER: OnceLock<TaskLifecycleManager> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task projection rendered by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub title: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at_ms: i64,
    /// Unix epoch milliseconds.
    pub due_at_ms: Option<i64>,
    pub has_reminder: bool,
}

/// Full list plus completion indicator counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in insertion order.
    pub items: Vec<TaskItem>,
    pub total: u32,
    pub completed: u32,
}

/// Action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the mutation was applied.
    pub ok: bool,
    /// Task state after the mutation, when one exists.
    pub task: Option<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: Option<&Task>) -> Self {
        Self {
            ok: true,
            task: task.map(to_task_item),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Reminder command for the native notification plugin.
///
/// `kind` is `schedule` or `cancel`; schedule-only fields are `None` for
/// cancel commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCommandItem {
    pub kind: String,
    pub handle: String,
    pub task_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub trigger_at_ms: Option<i64>,
}

/// Returns the current task list and completion counts.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TaskListResponse {
    to_list_response(&lifecycle().tasks())
}

/// Creates a task from the add-task form.
///
/// Blank titles are ignored and reported with `ok=false`.
pub async fn tasks_create(title: String, due_at_ms: Option<i64>) -> TaskActionResponse {
    match lifecycle().create_task(title.as_str(), due_at_ms).await {
        Some(task) => TaskActionResponse::success("Task created.", Some(&task)),
        None => TaskActionResponse::failure("Task title is blank."),
    }
}

/// Toggles completion for one task.
pub async fn tasks_toggle(task_id: String) -> TaskActionResponse {
    let Some(id) = parse_task_id(task_id.as_str()) else {
        return TaskActionResponse::failure(format!("invalid task id: {task_id}"));
    };
    match lifecycle().toggle_completion(id).await {
        Some(task) => TaskActionResponse::success("Task updated.", Some(&task)),
        None => TaskActionResponse::failure("Task not found or busy."),
    }
}

/// Toggles completion for several tasks in one commit.
///
/// Invalid, unknown and busy ids are skipped; returns the updated tasks.
pub async fn tasks_toggle_many(task_ids: Vec<String>) -> Vec<TaskItem> {
    let ids = task_ids
        .iter()
        .filter_map(|raw| parse_task_id(raw.as_str()))
        .collect::<Vec<_>>();
    lifecycle()
        .toggle_completion_batch(&ids)
        .await
        .iter()
        .map(to_task_item)
        .collect()
}

/// Replaces one task's due date; `None` clears it.
pub async fn tasks_set_due(task_id: String, due_at_ms: Option<i64>) -> TaskActionResponse {
    let Some(id) = parse_task_id(task_id.as_str()) else {
        return TaskActionResponse::failure(format!("invalid task id: {task_id}"));
    };
    match lifecycle().update_due_date(id, due_at_ms).await {
        Some(task) => TaskActionResponse::success("Due date updated.", Some(&task)),
        None => TaskActionResponse::failure("Task not found or busy."),
    }
}

/// Deletes one task and cancels its reminder.
pub async fn tasks_delete(task_id: String) -> TaskActionResponse {
    let Some(id) = parse_task_id(task_id.as_str()) else {
        return TaskActionResponse::failure(format!("invalid task id: {task_id}"));
    };
    if lifecycle().delete_task(id).await {
        TaskActionResponse::success("Task deleted.", None)
    } else {
        TaskActionResponse::failure("Task not found or busy.")
    }
}

/// Records the platform permission result reported by the host.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_set_permission(granted: bool) {
    let permission = if granted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    outbox().set_permission(permission);
}

/// Takes queued reminder commands, oldest first.
///
/// # FFI contract
/// - The host applies them to the platform notification API in order.
/// - Commands queue in memory until drained; the queue is unbounded, so the
///   host must drain after every task mutation (or at least on each resume).
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_drain() -> Vec<ReminderCommandItem> {
    outbox().drain().into_iter().map(to_command_item).collect()
}

fn outbox() -> &'static Arc<OutboxNotificationService> {
    OUTBOX.get_or_init(|| Arc::new(OutboxNotificationService::default()))
}

fn lifecycle() -> &'static TaskLifecycleManager {
    MANAGER.get_or_init(|| {
        TaskLifecycleManager::with_parts(
            outbox().clone(),
            Arc::new(SystemClock),
            resolve_lifecycle_config(),
        )
    })
}

fn resolve_lifecycle_config() -> LifecycleConfig {
    resolve_lifecycle_config_with(|key| std::env::var(key).ok())
}

/// Builds configuration from `REMINDO_*` values; invalid values keep defaults.
fn resolve_lifecycle_config_with(lookup: impl Fn(&str) -> Option<String>) -> LifecycleConfig {
    let value = |key: &str| lookup(key).and_then(|raw| non_blank(raw.as_str()));
    let mut config = LifecycleConfig::default();
    if let Some(title) = value("REMINDO_REMINDER_TITLE") {
        config.reminder_title = title;
    }
    if let Some(raw) = value("REMINDO_REMIND_UNDATED") {
        match parse_flag(raw.as_str()) {
            Some(flag) => config.remind_undated_on_create = flag,
            None => warn!("event=config_resolve module=ffi status=skipped key=REMINDO_REMIND_UNDATED"),
        }
    }
    if let Some(raw) = value("REMINDO_BODY_MAX_CHARS") {
        match raw.parse::<usize>() {
            Ok(max_chars) => config.body_max_chars = max_chars,
            Err(_) => warn!("event=config_resolve module=ffi status=skipped key=REMINDO_BODY_MAX_CHARS"),
        }
    }
    config.normalized()
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_task_id(raw: &str) -> Option<TaskId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Items and counts always come from the same snapshot.
fn to_list_response(tasks: &[Task]) -> TaskListResponse {
    let summary = TaskSummary::from_tasks(tasks);
    TaskListResponse {
        items: tasks.iter().map(to_task_item).collect(),
        total: saturating_u32(summary.total),
        completed: saturating_u32(summary.completed),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
        created_at_ms: task.created_at,
        due_at_ms: task.due_at,
        has_reminder: task.has_reminder(),
    }
}

fn to_command_item(command: NotificationCommand) -> ReminderCommandItem {
    match command {
        NotificationCommand::Schedule { handle, request } => ReminderCommandItem {
            kind: "schedule".to_string(),
            handle: handle.to_string(),
            task_id: Some(request.task_id.to_string()),
            title: Some(request.title),
            body: Some(request.body),
            trigger_at_ms: Some(request.trigger_at),
        },
        NotificationCommand::Cancel { handle } => ReminderCommandItem {
            kind: "cancel".to_string(),
            handle: handle.to_string(),
            task_id: None,
            title: None,
            body: None,
            trigger_at_ms: None,
        },
    }
}
