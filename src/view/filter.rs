//! Filter engine: conjunctive inclusive range bounds over a record slice.

use crate::domain::{FilterCriteria, IncomeRecord};

/// Return the records satisfying every active bound, in their input order.
///
/// An inactive (`None`) bound imposes no constraint; with all bounds inactive
/// this is the identity. Filtering never reorders and never fails: a min
/// above its paired max just matches nothing.
pub fn filter_records(records: &[IncomeRecord], criteria: &FilterCriteria) -> Vec<IncomeRecord> {
    records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

fn matches(record: &IncomeRecord, criteria: &FilterCriteria) -> bool {
    if let Some(start) = criteria.start_date
        && record.date < start
    {
        return false;
    }
    if let Some(end) = criteria.end_date
        && record.date > end
    {
        return false;
    }
    if let Some(min) = criteria.revenue_min
        && record.revenue < min
    {
        return false;
    }
    if let Some(max) = criteria.revenue_max
        && record.revenue > max
    {
        return false;
    }
    if let Some(min) = criteria.net_income_min
        && record.net_income < min
    {
        return false;
    }
    if let Some(max) = criteria.net_income_max
        && record.net_income > max
    {
        return false;
    }
    true
}
