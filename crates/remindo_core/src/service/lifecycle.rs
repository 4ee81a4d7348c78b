//! Task lifecycle manager.
//!
//! # Responsibility
//! - Own the task collection and mediate create/toggle/edit/delete.
//! - Map every mutation to the matching reminder schedule/cancel call.
//! - Swallow validation, not-found and notification failures.
//!
//! # Invariants
//! - A task holds `notification_id` iff its reminder is scheduled.
//! - Completed tasks never hold a reminder.
//! - A handle is cancelled at most once, and always before its task is
//!   removed.
//! - Batched toggles become visible in one snapshot commit.
//! - Operations targeting an id with an in-flight mutation are ignored.

use crate::clock::{Clock, SystemClock};
use crate::config::LifecycleConfig;
use crate::model::handle::NotificationHandle;
use crate::model::task::{Task, TaskId, TaskSummary};
use crate::notify::service::NotificationService;
use crate::service::reminder::{reminder_request, trigger_on_create, trigger_on_reschedule};
use crate::store::task_store::{TaskSnapshot, TaskStore};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the to-do list and its reminder side effects.
pub struct TaskLifecycleManager {
    store: TaskStore,
    notifier: Arc<dyn NotificationService>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
}

impl TaskLifecycleManager {
    /// Creates a manager with wall-clock time and default configuration.
    pub fn new(notifier: Arc<dyn NotificationService>) -> Self {
        Self::with_parts(notifier, Arc::new(SystemClock), LifecycleConfig::default())
    }

    pub fn with_parts(
        notifier: Arc<dyn NotificationService>,
        clock: Arc<dyn Clock>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store: TaskStore::new(),
            notifier,
            clock,
            config: config.normalized(),
        }
    }

    /// Latest committed task list, in insertion order.
    pub fn tasks(&self) -> TaskSnapshot {
        self.store.snapshot()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.store.find(id)
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.store.snapshot())
    }

    /// Receiver woken after every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<TaskSnapshot> {
        self.store.subscribe()
    }

    /// Creates one open task and schedules its first reminder.
    ///
    /// Blank titles are ignored and return `None`. Reminder failures leave
    /// the task without a `notification_id`.
    pub async fn create_task(&self, title: &str, due_at: Option<i64>) -> Option<Task> {
        let now = self.clock.now_ms();
        let mut task = match Task::new(title, now, due_at) {
            Ok(task) => task,
            Err(_) => {
                debug!("event=task_create module=lifecycle status=skipped reason=blank_title");
                return None;
            }
        };

        let _claim = self.store.claim(&[task.id]);
        if let Some(trigger_at) = trigger_on_create(&self.config, &task, now) {
            task.notification_id = self.schedule_reminder(&task, trigger_at).await;
        }

        if !self.store.append(task.clone()) {
            warn!(
                "event=task_create module=lifecycle status=error reason=duplicate_id task_id={}",
                task.id
            );
            self.cancel_reminder(task.id, task.notification_id.as_ref())
                .await;
            return None;
        }

        info!(
            "event=task_create module=lifecycle status=ok task_id={} has_due={} reminder={}",
            task.id,
            task.due_at.is_some(),
            task.has_reminder()
        );
        Some(task)
    }

    /// Flips completion for one task.
    ///
    /// Completing cancels the live reminder. Reopening schedules a fresh one
    /// only when the due date is still in the future. Unknown or busy ids
    /// return `None`.
    pub async fn toggle_completion(&self, id: TaskId) -> Option<Task> {
        let claim = self.store.claim(&[id]);
        if !claim.holds(id) {
            return None;
        }
        let task = self.find_or_log(id, "task_toggle")?;

        let updated = self.toggled(task).await;
        self.store.replace_all(std::slice::from_ref(&updated));
        info!(
            "event=task_toggle module=lifecycle status=ok task_id={} completed={} reminder={}",
            updated.id,
            updated.completed,
            updated.has_reminder()
        );
        Some(updated)
    }

    /// Flips completion for several tasks and commits them together.
    ///
    /// Duplicate, unknown and busy ids are skipped. Returns the updated
    /// tasks in request order.
    pub async fn toggle_completion_batch(&self, ids: &[TaskId]) -> Vec<Task> {
        let mut distinct = Vec::with_capacity(ids.len());
        for id in ids {
            if !distinct.contains(id) {
                distinct.push(*id);
            }
        }

        let claim = self.store.claim(&distinct);
        let snapshot = self.store.snapshot();
        let mut updated = Vec::with_capacity(claim.ids().len());
        for id in claim.ids() {
            let Some(task) = snapshot.iter().find(|task| task.id == *id).cloned() else {
                debug!("event=task_toggle_batch module=lifecycle status=skipped reason=not_found task_id={id}");
                continue;
            };
            updated.push(self.toggled(task).await);
        }

        if !updated.is_empty() {
            self.store.replace_all(&updated);
        }
        info!(
            "event=task_toggle_batch module=lifecycle status=ok requested={} applied={}",
            distinct.len(),
            updated.len()
        );
        updated
    }

    /// Replaces the due date of one task and re-arms its reminder.
    ///
    /// The current reminder is always cancelled. A new one is scheduled
    /// only for an open task whose new due date is in the future.
    pub async fn update_due_date(&self, id: TaskId, due_at: Option<i64>) -> Option<Task> {
        let claim = self.store.claim(&[id]);
        if !claim.holds(id) {
            return None;
        }
        let mut task = self.find_or_log(id, "task_due_update")?;

        let previous = task.notification_id.take();
        self.cancel_reminder(task.id, previous.as_ref()).await;
        task.due_at = due_at;
        if let Some(trigger_at) = trigger_on_reschedule(&task, self.clock.now_ms()) {
            task.notification_id = self.schedule_reminder(&task, trigger_at).await;
        }

        self.store.replace_all(std::slice::from_ref(&task));
        info!(
            "event=task_due_update module=lifecycle status=ok task_id={} has_due={} reminder={}",
            task.id,
            task.due_at.is_some(),
            task.has_reminder()
        );
        Some(task)
    }

    /// Cancels the task's reminder, then removes the task.
    ///
    /// Returns whether a task was removed.
    pub async fn delete_task(&self, id: TaskId) -> bool {
        let claim = self.store.claim(&[id]);
        if !claim.holds(id) {
            return false;
        }
        let Some(task) = self.find_or_log(id, "task_delete") else {
            return false;
        };

        self.cancel_reminder(task.id, task.notification_id.as_ref())
            .await;
        let removed = self.store.remove(id).is_some();
        info!("event=task_delete module=lifecycle status=ok task_id={id} removed={removed}");
        removed
    }

    async fn toggled(&self, mut task: Task) -> Task {
        if task.completed {
            task.completed = false;
            if let Some(trigger_at) = trigger_on_reschedule(&task, self.clock.now_ms()) {
                task.notification_id = self.schedule_reminder(&task, trigger_at).await;
            }
        } else {
            let handle = task.notification_id.take();
            self.cancel_reminder(task.id, handle.as_ref()).await;
            task.completed = true;
        }
        task
    }

    async fn schedule_reminder(&self, task: &Task, trigger_at: i64) -> Option<NotificationHandle> {
        let permission = self.notifier.request_permission().await;
        if !permission.is_granted() {
            info!(
                "event=reminder_schedule module=lifecycle status=skipped reason=permission_{} task_id={}",
                permission.as_str(),
                task.id
            );
            return None;
        }

        let request = reminder_request(&self.config, task, trigger_at);
        match self.notifier.schedule(request).await {
            Ok(handle) => {
                debug!(
                    "event=reminder_schedule module=lifecycle status=ok task_id={} handle={} trigger_at={}",
                    task.id, handle, trigger_at
                );
                Some(handle)
            }
            Err(err) => {
                warn!(
                    "event=reminder_schedule module=lifecycle status=error reason={} task_id={}",
                    err.kind(),
                    task.id
                );
                None
            }
        }
    }

    async fn cancel_reminder(&self, task_id: TaskId, handle: Option<&NotificationHandle>) {
        let Some(handle) = handle else {
            return;
        };
        match self.notifier.cancel(handle).await {
            Ok(()) => debug!(
                "event=reminder_cancel module=lifecycle status=ok task_id={task_id} handle={handle}"
            ),
            Err(err) => warn!(
                "event=reminder_cancel module=lifecycle status=error reason={} task_id={task_id} handle={handle}",
                err.kind()
            ),
        }
    }

    fn find_or_log(&self, id: TaskId, event: &str) -> Option<Task> {
        let task = self.store.find(id);
        if task.is_none() {
            debug!("event={event} module=lifecycle status=skipped reason=not_found task_id={id}");
        }
        task
    }
}
