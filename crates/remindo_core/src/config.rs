//! Lifecycle configuration.
//!
//! # Responsibility
//! - Hold the knobs that shape reminder content and scheduling.
//! - Provide defaults usable without any host configuration.
//!
//! # Invariants
//! - `body_max_chars` is at least 1 after `normalized()`.
//! - A blank `reminder_title` falls back to the default title.

use serde::Deserialize;

pub const DEFAULT_REMINDER_TITLE: &str = "Task reminder";
pub const DEFAULT_BODY_MAX_CHARS: usize = 120;

/// Configuration for `TaskLifecycleManager`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Notification title shown for every reminder.
    pub reminder_title: String,
    /// Schedule an immediate reminder when a task is created without a due date.
    pub remind_undated_on_create: bool,
    /// Char cap for reminder bodies derived from task titles.
    pub body_max_chars: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            reminder_title: DEFAULT_REMINDER_TITLE.to_string(),
            remind_undated_on_create: true,
            body_max_chars: DEFAULT_BODY_MAX_CHARS,
        }
    }
}

impl LifecycleConfig {
    /// Returns a copy with out-of-range values replaced by defaults.
    pub fn normalized(mut self) -> Self {
        let title = self.reminder_title.trim();
        self.reminder_title = if title.is_empty() {
            DEFAULT_REMINDER_TITLE.to_string()
        } else {
            title.to_string()
        };
        if self.body_max_chars == 0 {
            self.body_max_chars = DEFAULT_BODY_MAX_CHARS;
        }
        self
    }
}
