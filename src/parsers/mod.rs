//! Parsing of Go sources and module files
//!
//! The import scanner reads package headers with tree-sitter; the go.mod
//! reader extracts the module path that anchors every internal import.

pub mod go_mod;
pub mod import_scanner;

pub use go_mod::read_module_path;
pub use import_scanner::{ImportScanner, PackageScanner, ScannedPackage};
