//! In-memory task state.
//!
//! # Responsibility
//! - Own the single task collection and publish it as immutable snapshots.
//! - Linearize mutations per task id.
//!
//! # Invariants
//! - Snapshots are replaced wholesale; a published snapshot never changes.
//! - Task order is insertion order; ids are unique within a snapshot.
//! - At most one mutation holds a claim on a given task id.

pub mod task_store;
