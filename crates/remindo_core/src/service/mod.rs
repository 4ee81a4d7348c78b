//! Core use-case services.
//!
//! # Responsibility
//! - Mediate every task mutation together with its reminder side effect.
//! - Keep presentation/FFI layers decoupled from notification details.

pub mod lifecycle;
pub mod reminder;
