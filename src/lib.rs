//! `stmt-view` library crate.
//!
//! The binary (`sv`) is a thin wrapper around this library so that:
//!
//! - the filter/sort core is testable without a terminal or network
//! - modules are reusable (e.g., future GUI, exports, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
pub mod tui;
pub mod view;
