//! Snapshot store with per-task claims.

use crate::model::task::{Task, TaskId};
use log::debug;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Immutable view of the whole task list.
pub type TaskSnapshot = Arc<Vec<Task>>;

/// Single owner of the task collection.
pub struct TaskStore {
    snapshot: watch::Sender<TaskSnapshot>,
    in_flight: Mutex<HashSet<TaskId>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            snapshot,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Returns the latest committed snapshot.
    pub fn snapshot(&self) -> TaskSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Returns a receiver woken after every commit.
    pub fn subscribe(&self) -> watch::Receiver<TaskSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn find(&self, id: TaskId) -> Option<Task> {
        self.snapshot
            .borrow()
            .iter()
            .find(|task| task.id == id)
            .cloned()
    }

    /// Appends one task in a single commit.
    ///
    /// Returns `false` when a task with the same id already exists.
    pub fn append(&self, task: Task) -> bool {
        self.commit(|current| {
            if current.iter().any(|existing| existing.id == task.id) {
                return None;
            }
            let mut next = current.to_vec();
            next.push(task);
            Some(next)
        })
    }

    /// Replaces every task whose id matches one of `updated`, in one commit.
    ///
    /// Tasks no longer present in the latest snapshot are skipped. Returns
    /// the number of tasks replaced.
    pub fn replace_all(&self, updated: &[Task]) -> usize {
        let mut replaced = 0;
        self.commit(|current| {
            let mut next = current.to_vec();
            for task in updated {
                if let Some(slot) = next.iter_mut().find(|slot| slot.id == task.id) {
                    *slot = task.clone();
                    replaced += 1;
                }
            }
            (replaced > 0).then_some(next)
        });
        replaced
    }

    /// Removes one task in a single commit. Returns the removed task.
    pub fn remove(&self, id: TaskId) -> Option<Task> {
        let mut removed = None;
        self.commit(|current| {
            let position = current.iter().position(|task| task.id == id)?;
            let mut next = current.to_vec();
            removed = Some(next.remove(position));
            Some(next)
        });
        removed
    }

    /// Claims exclusive mutation rights for the given ids.
    ///
    /// Ids already claimed by another in-flight operation are left out of
    /// the returned claim. The claim is released on drop.
    pub fn claim(&self, ids: &[TaskId]) -> TaskClaim<'_> {
        let mut in_flight = self.lock_in_flight();
        let mut claimed = Vec::with_capacity(ids.len());
        for id in ids {
            if in_flight.insert(*id) {
                claimed.push(*id);
            } else if !claimed.contains(id) {
                debug!("event=task_claim module=store status=skipped reason=in_flight task_id={id}");
            }
        }
        TaskClaim {
            store: self,
            ids: claimed,
        }
    }

    /// Computes the next snapshot from the latest one and publishes it.
    ///
    /// `next` returns `None` to leave the snapshot untouched.
    fn commit(&self, next: impl FnOnce(&[Task]) -> Option<Vec<Task>>) -> bool {
        self.snapshot.send_if_modified(|current| match next(current.as_slice()) {
            Some(tasks) => {
                *current = Arc::new(tasks);
                true
            }
            None => false,
        })
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashSet<TaskId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive mutation rights on a set of task ids.
pub struct TaskClaim<'store> {
    store: &'store TaskStore,
    ids: Vec<TaskId>,
}

impl TaskClaim<'_> {
    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    pub fn holds(&self, id: TaskId) -> bool {
        self.ids.contains(&id)
    }
}

impl Drop for TaskClaim<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.store.lock_in_flight();
        for id in &self.ids {
            in_flight.remove(id);
        }
    }
}
