//! Outbox notification service for native hosts.
//!
//! # Responsibility
//! - Issue reminder handles synchronously from core.
//! - Queue schedule/cancel commands for the host to execute natively.
//! - Track the set of live reminders and the host-reported permission.
//!
//! # Invariants
//! - Handles are `reminder-<n>` with strictly increasing `n`; never reused.
//! - A handle is live from its `Schedule` command until its `Cancel` command.
//! - Commands are drained in the order they were issued.
//! - The command queue is unbounded; it only shrinks through `drain`.

use crate::model::handle::NotificationHandle;
use crate::notify::service::{
    NotificationError, NotificationService, PermissionStatus, ReminderRequest,
};
use async_trait::async_trait;
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

const HANDLE_PREFIX: &str = "reminder-";

/// Command the native host must apply to the platform notification API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    Schedule {
        handle: NotificationHandle,
        request: ReminderRequest,
    },
    Cancel {
        handle: NotificationHandle,
    },
}

impl NotificationCommand {
    pub fn handle(&self) -> &NotificationHandle {
        match self {
            Self::Schedule { handle, .. } | Self::Cancel { handle } => handle,
        }
    }
}

struct OutboxState {
    permission: PermissionStatus,
    next_seq: u64,
    live: BTreeMap<NotificationHandle, ReminderRequest>,
    pending: Vec<NotificationCommand>,
}

/// In-process notification service that defers platform work to the host.
pub struct OutboxNotificationService {
    state: Mutex<OutboxState>,
}

impl Default for OutboxNotificationService {
    fn default() -> Self {
        Self::new(PermissionStatus::Granted)
    }
}

impl OutboxNotificationService {
    pub fn new(permission: PermissionStatus) -> Self {
        Self {
            state: Mutex::new(OutboxState {
                permission,
                next_seq: 1,
                live: BTreeMap::new(),
                pending: Vec::new(),
            }),
        }
    }

    /// Records the permission state reported by the host.
    pub fn set_permission(&self, permission: PermissionStatus) {
        self.lock().permission = permission;
    }

    pub fn permission(&self) -> PermissionStatus {
        self.lock().permission
    }

    /// Takes all queued commands, oldest first.
    pub fn drain(&self) -> Vec<NotificationCommand> {
        std::mem::take(&mut self.lock().pending)
    }

    /// Returns queued commands without consuming them.
    pub fn pending(&self) -> Vec<NotificationCommand> {
        self.lock().pending.clone()
    }

    /// Returns the reminder behind a live handle.
    pub fn live_reminder(&self, handle: &NotificationHandle) -> Option<ReminderRequest> {
        self.lock().live.get(handle).cloned()
    }

    /// Returns live handles in issue order.
    pub fn live_handles(&self) -> Vec<NotificationHandle> {
        let state = self.lock();
        let mut handles = state.live.keys().cloned().collect::<Vec<_>>();
        handles.sort_by_key(handle_seq);
        handles
    }

    fn lock(&self) -> MutexGuard<'_, OutboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationService for OutboxNotificationService {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission()
    }

    async fn schedule(
        &self,
        request: ReminderRequest,
    ) -> Result<NotificationHandle, NotificationError> {
        let mut state = self.lock();
        if !state.permission.is_granted() {
            return Err(NotificationError::PermissionDenied);
        }

        let raw = format!("{HANDLE_PREFIX}{}", state.next_seq);
        let handle = NotificationHandle::new(raw)
            .ok_or_else(|| NotificationError::Unavailable("handle allocation failed".into()))?;
        state.next_seq += 1;
        state.live.insert(handle.clone(), request.clone());
        state.pending.push(NotificationCommand::Schedule {
            handle: handle.clone(),
            request,
        });
        debug!(
            "event=outbox_schedule module=notify status=ok handle={} pending={}",
            handle,
            state.pending.len()
        );
        Ok(handle)
    }

    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), NotificationError> {
        let mut state = self.lock();
        if state.live.remove(handle).is_none() {
            return Err(NotificationError::UnknownHandle(handle.clone()));
        }
        state.pending.push(NotificationCommand::Cancel {
            handle: handle.clone(),
        });
        debug!(
            "event=outbox_cancel module=notify status=ok handle={} pending={}",
            handle,
            state.pending.len()
        );
        Ok(())
    }
}

fn handle_seq(handle: &NotificationHandle) -> u64 {
    handle
        .as_str()
        .strip_prefix(HANDLE_PREFIX)
        .and_then(|seq| seq.parse().ok())
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::handle_seq;
    use crate::model::handle::NotificationHandle;

    #[test]
    fn handle_seq_orders_numerically() {
        let nine = NotificationHandle::new("reminder-9").expect("handle");
        let ten = NotificationHandle::new("reminder-10").expect("handle");
        assert!(handle_seq(&nine) < handle_seq(&ten));
    }

    #[test]
    fn foreign_handles_sort_last() {
        let foreign = NotificationHandle::new("ios-abc").expect("handle");
        assert_eq!(handle_seq(&foreign), u64::MAX);
    }
}
