//! Domain model for the to-do list and its reminders.
//!
//! # Responsibility
//! - Define the canonical task record read by the presentation layer.
//! - Define the opaque reminder handle issued by notification services.
//!
//! # Invariants
//! - Every task is identified by a stable, non-nil `TaskId`.
//! - A completed task never holds a reminder handle.

pub mod handle;
pub mod task;
