//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in-memory for the whole session
//! - passed by reference into the pure filter/sort functions
//! - exported later (CSV/JSON) without conversion

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One reporting-period entry as fetched from the provider.
///
/// Records are immutable after ingest; the filter/sort core only ever reads
/// them and returns new sequences. `gross_profit`, `eps`, and
/// `operating_income` are display-only columns: they are rendered but carry
/// no filter bound and no sort affordance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub date: NaiveDate,
    pub revenue: f64,
    pub net_income: f64,
    pub gross_profit: f64,
    pub eps: f64,
    pub operating_income: f64,
}

/// Resolved filter bounds: `None` imposes no constraint on that dimension.
///
/// All bounds are inclusive. Bounds are independent of each other; a min
/// above its paired max simply matches nothing (no error path).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub revenue_min: Option<f64>,
    pub revenue_max: Option<f64>,
    pub net_income_min: Option<f64>,
    pub net_income_max: Option<f64>,
}

impl FilterCriteria {
    /// Interpret the six raw text fields.
    ///
    /// Empty or unparseable text yields `None` — the constraint is disabled
    /// rather than coerced to a sentinel value or reported as an error.
    pub fn from_inputs(inputs: &FilterInputs) -> Self {
        Self {
            start_date: parse_date_bound(&inputs.start_date),
            end_date: parse_date_bound(&inputs.end_date),
            revenue_min: parse_amount_bound(&inputs.revenue_min),
            revenue_max: parse_amount_bound(&inputs.revenue_max),
            net_income_min: parse_amount_bound(&inputs.net_income_min),
            net_income_max: parse_amount_bound(&inputs.net_income_max),
        }
    }

    /// True when no bound is active (filtering is the identity).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The six filter fields as typed by the user, before interpretation.
///
/// The TUI edits these in place; `FilterCriteria::from_inputs` re-resolves
/// them on every change.
#[derive(Debug, Clone, Default)]
pub struct FilterInputs {
    pub start_date: String,
    pub end_date: String,
    pub revenue_min: String,
    pub revenue_max: String,
    pub net_income_min: String,
    pub net_income_max: String,
}

impl FilterInputs {
    pub fn field_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
            FilterField::RevenueMin => &mut self.revenue_min,
            FilterField::RevenueMax => &mut self.revenue_max,
            FilterField::NetIncomeMin => &mut self.net_income_min,
            FilterField::NetIncomeMax => &mut self.net_income_max,
        }
    }

    pub fn field(&self, field: FilterField) -> &str {
        match field {
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
            FilterField::RevenueMin => &self.revenue_min,
            FilterField::RevenueMax => &self.revenue_max,
            FilterField::NetIncomeMin => &self.net_income_min,
            FilterField::NetIncomeMax => &self.net_income_max,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Identifies one of the six editable filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    StartDate,
    EndDate,
    RevenueMin,
    RevenueMax,
    NetIncomeMin,
    NetIncomeMax,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::RevenueMin,
        FilterField::RevenueMax,
        FilterField::NetIncomeMin,
        FilterField::NetIncomeMax,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::StartDate => "Start date",
            FilterField::EndDate => "End date",
            FilterField::RevenueMin => "Revenue min",
            FilterField::RevenueMax => "Revenue max",
            FilterField::NetIncomeMin => "Net income min",
            FilterField::NetIncomeMax => "Net income max",
        }
    }

    /// True for the two date fields (restricts accepted characters while editing).
    pub fn is_date(&self) -> bool {
        matches!(self, FilterField::StartDate | FilterField::EndDate)
    }
}

/// Parse a date bound (`YYYY-MM-DD`); empty or malformed text disables it.
pub fn parse_date_bound(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Parse a numeric bound; empty or malformed text disables it.
///
/// Accepts an optional leading `$` and `,`/`_` grouping so pasted display
/// values ("$391,035,000,000") work. Non-finite parses are rejected.
pub fn parse_amount_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '_').collect();
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Reporting period granularity offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Annual,
    Quarter,
}

impl Period {
    /// The value the provider expects in its `period` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            Period::Annual => "annual",
            Period::Quarter => "quarter",
        }
    }
}

/// A sortable column. Display-only columns have no variant here, so sorting
/// on them is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortColumn {
    Date,
    Revenue,
    NetIncome,
}

impl SortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Date => "Date",
            SortColumn::Revenue => "Revenue",
            SortColumn::NetIncome => "Net Income",
        }
    }
}

/// Sort direction for an active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The current sort state: one active column with a direction, or none.
///
/// Per-activation transitions:
///
/// - `Unsorted --activate(col)--> Ascending(col)`
/// - `Ascending(col) --activate(col)--> Descending(col)`
/// - `Descending(col) --activate(col)--> Ascending(col)`
/// - any state `--activate(other)--> Ascending(other)`
///
/// There is no activation path back to `Unsorted`; only an explicit
/// [`SortSpec::reset`] (filters reset, fresh fetch) returns there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortSpec {
    #[default]
    Unsorted,
    By {
        column: SortColumn,
        direction: SortDirection,
    },
}

impl SortSpec {
    pub fn ascending(column: SortColumn) -> Self {
        SortSpec::By {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Apply one column activation (a header click) to the state machine.
    pub fn activate(self, column: SortColumn) -> Self {
        match self {
            SortSpec::By {
                column: current,
                direction,
            } if current == column => SortSpec::By {
                column,
                direction: direction.flipped(),
            },
            _ => SortSpec::ascending(column),
        }
    }

    pub fn reset(&mut self) {
        *self = SortSpec::Unsorted;
    }

    /// Direction indicator for a column header, if that column is active.
    pub fn direction_for(&self, column: SortColumn) -> Option<SortDirection> {
        match self {
            SortSpec::By {
                column: current,
                direction,
            } if *current == column => Some(*direction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_bound_parsing() {
        assert_eq!(parse_amount_bound("60"), Some(60.0));
        assert_eq!(parse_amount_bound("  -1.5e9 "), Some(-1.5e9));
        assert_eq!(parse_amount_bound("$391,035,000,000"), Some(391_035_000_000.0));
        assert_eq!(parse_amount_bound("1_000"), Some(1000.0));

        assert_eq!(parse_amount_bound(""), None);
        assert_eq!(parse_amount_bound("   "), None);
        assert_eq!(parse_amount_bound("abc"), None);
        assert_eq!(parse_amount_bound("12abc"), None);
        assert_eq!(parse_amount_bound("NaN"), None);
        assert_eq!(parse_amount_bound("inf"), None);
    }

    #[test]
    fn date_bound_parsing() {
        assert_eq!(
            parse_date_bound("2021-06-01"),
            NaiveDate::from_ymd_opt(2021, 6, 1)
        );
        assert_eq!(parse_date_bound(" 2021-06-01 "), NaiveDate::from_ymd_opt(2021, 6, 1));
        assert_eq!(parse_date_bound(""), None);
        assert_eq!(parse_date_bound("06/01/2021"), None);
        assert_eq!(parse_date_bound("2021-13-40"), None);
    }

    #[test]
    fn criteria_from_inputs_disables_bad_bounds() {
        let mut inputs = FilterInputs::default();
        inputs.revenue_min = "60".to_string();
        inputs.revenue_max = "not a number".to_string();
        inputs.start_date = "2020-01-01".to_string();
        inputs.end_date = "yesterday".to_string();

        let criteria = FilterCriteria::from_inputs(&inputs);
        assert_eq!(criteria.revenue_min, Some(60.0));
        assert_eq!(criteria.revenue_max, None);
        assert_eq!(criteria.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(criteria.end_date, None);
        assert!(!criteria.is_empty());

        assert!(FilterCriteria::from_inputs(&FilterInputs::default()).is_empty());
    }

    #[test]
    fn sort_spec_two_state_toggle() {
        let spec = SortSpec::Unsorted;

        let spec = spec.activate(SortColumn::Date);
        assert_eq!(spec, SortSpec::ascending(SortColumn::Date));

        let spec = spec.activate(SortColumn::Date);
        assert_eq!(
            spec,
            SortSpec::By {
                column: SortColumn::Date,
                direction: SortDirection::Descending
            }
        );

        // Third activation flips back to ascending, never to Unsorted.
        let spec = spec.activate(SortColumn::Date);
        assert_eq!(spec, SortSpec::ascending(SortColumn::Date));

        // Switching column always starts ascending.
        let spec = spec.activate(SortColumn::Revenue);
        assert_eq!(spec, SortSpec::ascending(SortColumn::Revenue));

        let mut spec = spec;
        spec.reset();
        assert_eq!(spec, SortSpec::Unsorted);
    }

    #[test]
    fn direction_indicator_only_on_active_column() {
        let spec = SortSpec::ascending(SortColumn::Revenue);
        assert_eq!(
            spec.direction_for(SortColumn::Revenue),
            Some(SortDirection::Ascending)
        );
        assert_eq!(spec.direction_for(SortColumn::Date), None);
        assert_eq!(SortSpec::Unsorted.direction_for(SortColumn::Date), None);
    }
}
