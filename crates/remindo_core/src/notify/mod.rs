//! Notification service seam.
//!
//! # Responsibility
//! - Define the async contract the lifecycle manager uses for reminders.
//! - Provide the outbox implementation bridged to the native host.
//!
//! # Invariants
//! - Implementations never block the caller on user interaction.
//! - Every successful `schedule` returns a handle not issued before.

pub mod outbox;
pub mod service;
