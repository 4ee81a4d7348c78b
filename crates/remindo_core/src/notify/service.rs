//! Notification service contract.

use crate::model::handle::NotificationHandle;
use crate::model::task::TaskId;
use async_trait::async_trait;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of asking the platform for notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

/// One reminder to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRequest {
    pub task_id: TaskId,
    pub title: String,
    pub body: String,
    /// Unix epoch milliseconds.
    pub trigger_at: i64,
}

/// Notification service failures. Callers treat all of them as "no reminder".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    PermissionDenied,
    UnknownHandle(NotificationHandle),
    Unavailable(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::UnknownHandle(handle) => write!(f, "unknown notification handle: {handle}"),
            Self::Unavailable(details) => write!(f, "notification service unavailable: {details}"),
        }
    }
}

impl Error for NotificationError {}

impl NotificationError {
    /// Stable short label for structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::UnknownHandle(_) => "unknown_handle",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Platform notification service used by the lifecycle manager.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn schedule(
        &self,
        request: ReminderRequest,
    ) -> Result<NotificationHandle, NotificationError>;

    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), NotificationError>;
}
