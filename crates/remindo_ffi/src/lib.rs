//! Flutter bridge crate for Remindo.
//! `api` holds the functions exported to Dart.

pub mod api;
