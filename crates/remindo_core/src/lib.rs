//! Core domain logic for Remindo.
//! This crate is the single source of truth for task and reminder invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use config::LifecycleConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::handle::NotificationHandle;
pub use model::task::{Task, TaskId, TaskSummary, TaskValidationError};
pub use notify::outbox::{NotificationCommand, OutboxNotificationService};
pub use notify::service::{
    NotificationError, NotificationService, PermissionStatus, ReminderRequest,
};
pub use service::lifecycle::TaskLifecycleManager;
pub use store::task_store::TaskSnapshot;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
