//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `remindo_core` linkage without the Flutter/FFI runtime.
//! - Drive one deterministic lifecycle pass and print the reminder outbox.

use remindo_core::{
    Clock, LifecycleConfig, NotificationCommand, OutboxNotificationService, SystemClock,
    TaskLifecycleManager,
};
use std::sync::Arc;

const HOUR_MS: i64 = 60 * 60 * 1000;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("remindo_core ping={}", remindo_core::ping());
    println!("remindo_core version={}", remindo_core::core_version());

    let outbox = Arc::new(OutboxNotificationService::default());
    let manager = TaskLifecycleManager::with_parts(
        outbox.clone(),
        Arc::new(SystemClock),
        LifecycleConfig::default(),
    );

    let due = SystemClock.now_ms() + HOUR_MS;
    let Some(task) = manager.create_task("smoke check", Some(due)).await else {
        println!("create=skipped");
        return;
    };
    manager.toggle_completion(task.id).await;
    manager.toggle_completion(task.id).await;
    manager.delete_task(task.id).await;

    let summary = manager.summary();
    println!(
        "tasks total={} completed={} reminders={}",
        summary.total, summary.completed, summary.pending_reminders
    );
    for command in outbox.drain() {
        match command {
            NotificationCommand::Schedule { handle, request } => {
                println!("outbox schedule handle={handle} trigger_at={}", request.trigger_at)
            }
            NotificationCommand::Cancel { handle } => println!("outbox cancel handle={handle}"),
        }
    }
}
