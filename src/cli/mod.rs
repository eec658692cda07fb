//! Command-line interface components

pub mod args;
pub mod commands;

pub use args::{Args, LogFormat};
pub use commands::Command;
