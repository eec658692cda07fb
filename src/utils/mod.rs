//! Shared helpers

pub mod pattern;

pub use pattern::{matches, matches_any};
