//! Shared view-derivation pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! raw dataset -> filter -> sort -> visible rows
//!
//! The derivation always starts from the raw dataset, never from a previous
//! view, so the visible rows can't drift as bounds change back and forth.

use crate::domain::{FilterCriteria, IncomeRecord, SortSpec};
use crate::view::{filter_records, sort_records};

/// Compute the visible rows for the current criteria and sort state.
pub fn derive_view(
    raw: &[IncomeRecord],
    criteria: &FilterCriteria,
    spec: SortSpec,
) -> Vec<IncomeRecord> {
    sort_records(&filter_records(raw, criteria), spec)
}
