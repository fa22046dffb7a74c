//! Formatted terminal output for the one-shot table command.
//!
//! We keep formatting code in one place so:
//! - the filter/sort core stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::format_view;
