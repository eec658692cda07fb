//! Source tree walking, scanning and impact analysis

pub mod analyzer;
pub mod parallel;
pub mod walker;

pub use analyzer::ImpactAnalyzer;
pub use parallel::CachedScanner;
pub use walker::SourceWalker;
