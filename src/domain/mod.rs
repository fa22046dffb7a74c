//! Shared domain types.
//!
//! This module defines:
//!
//! - the immutable fetched record (`IncomeRecord`)
//! - resolved filter bounds (`FilterCriteria`) and their raw text form
//!   (`FilterInputs`)
//! - the sort state machine (`SortSpec`, `SortColumn`, `SortDirection`)

pub mod types;

pub use types::*;
