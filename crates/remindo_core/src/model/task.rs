//! Task domain model.
//!
//! # Responsibility
//! - Define the single record held by the to-do list.
//! - Provide validated constructors and completion/reminder helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is trimmed and never blank.
//! - `notification_id` is `Some` only while a reminder is scheduled, and
//!   never on a completed task.

use crate::model::handle::NotificationHandle;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task.
pub type TaskId = Uuid;

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    BlankTitle,
    ReminderOnCompletedTask,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id cannot be nil"),
            Self::BlankTitle => write!(f, "task title cannot be blank"),
            Self::ReminderOnCompletedTask => {
                write!(f, "completed task cannot hold a scheduled reminder")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Unix epoch milliseconds, stamped once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds. Drives the reminder trigger time.
    pub due_at: Option<i64>,
    /// Handle of the currently scheduled reminder, if any.
    pub notification_id: Option<NotificationHandle>,
}

/// Unvalidated wire shape; deserialization goes through `Task::validate`.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    completed: bool,
    created_at: i64,
    due_at: Option<i64>,
    notification_id: Option<NotificationHandle>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            id: value.id,
            title: value.title,
            completed: value.completed,
            created_at: value.created_at,
            due_at: value.due_at,
            notification_id: value.notification_id,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates an open task with a generated id.
    ///
    /// The title is trimmed; blank titles are rejected.
    pub fn new(
        title: &str,
        created_at: i64,
        due_at: Option<i64>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, created_at, due_at)
    }

    /// Creates an open task with a caller-provided id.
    pub fn with_id(
        id: TaskId,
        title: &str,
        created_at: i64,
        due_at: Option<i64>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.trim().to_string(),
            completed: false,
            created_at,
            due_at,
            notification_id: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Validates task invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.completed && self.notification_id.is_some() {
            return Err(TaskValidationError::ReminderOnCompletedTask);
        }
        Ok(())
    }

    pub fn has_reminder(&self) -> bool {
        self.notification_id.is_some()
    }

    /// Returns whether the due date is strictly after `now`.
    pub fn is_due_after(&self, now: i64) -> bool {
        matches!(self.due_at, Some(due_at) if due_at > now)
    }
}

/// Completion indicator shown next to the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending_reminders: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            if task.completed {
                summary.completed += 1;
            }
            if task.has_reminder() {
                summary.pending_reminders += 1;
            }
            summary
        })
    }

    pub fn open(&self) -> usize {
        self.total - self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskSummary};
    use crate::model::handle::NotificationHandle;

    #[test]
    fn is_due_after_requires_strictly_future_due_date() {
        let task = Task::new("water plants", 0, Some(1_000)).expect("valid task");
        assert!(task.is_due_after(999));
        assert!(!task.is_due_after(1_000));

        let undated = Task::new("someday", 0, None).expect("valid task");
        assert!(!undated.is_due_after(0));
    }

    #[test]
    fn summary_counts_completed_and_reminders() {
        let mut done = Task::new("done", 0, None).expect("valid task");
        done.completed = true;
        let mut reminded = Task::new("reminded", 0, Some(10)).expect("valid task");
        reminded.notification_id = NotificationHandle::new("reminder-1");
        let plain = Task::new("plain", 0, None).expect("valid task");

        let summary = TaskSummary::from_tasks(&[done, reminded, plain]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.open(), 2);
        assert_eq!(summary.pending_reminders, 1);
    }
}
