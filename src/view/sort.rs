//! Sort engine: single-column stable sort with a direction.

use std::cmp::Ordering;

use crate::domain::{IncomeRecord, SortColumn, SortDirection, SortSpec};

/// Return the records ordered per `spec`.
///
/// `Unsorted` preserves input order (for a fresh fetch that is the
/// provider's most-recent-first order). Active sorts are stable: records
/// with equal values on the sort column keep their relative input order.
pub fn sort_records(records: &[IncomeRecord], spec: SortSpec) -> Vec<IncomeRecord> {
    let mut out = records.to_vec();
    if let SortSpec::By { column, direction } = spec {
        // Vec::sort_by is stable, so ties keep source order in both directions.
        out.sort_by(|a, b| {
            let ord = compare_column(a, b, column);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    out
}

fn compare_column(a: &IncomeRecord, b: &IncomeRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Date => a.date.cmp(&b.date),
        SortColumn::Revenue => a.revenue.total_cmp(&b.revenue),
        SortColumn::NetIncome => a.net_income.total_cmp(&b.net_income),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, revenue: f64, net_income: f64) -> IncomeRecord {
        IncomeRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            revenue,
            net_income,
            gross_profit: 0.0,
            eps: 0.0,
            operating_income: 0.0,
        }
    }

    #[test]
    fn unsorted_is_identity() {
        let records = vec![
            record("2022-09-24", 394.0, 99.8),
            record("2023-09-30", 383.0, 97.0),
            record("2021-09-25", 365.8, 94.7),
        ];
        assert_eq!(sort_records(&records, SortSpec::Unsorted), records);
        assert!(sort_records(&[], SortSpec::ascending(SortColumn::Date)).is_empty());
    }

    #[test]
    fn revenue_ascending() {
        let records = vec![record("2020-01-01", 100.0, 0.0), record("2021-01-01", 50.0, 0.0)];
        let out = sort_records(&records, SortSpec::ascending(SortColumn::Revenue));
        let revenues: Vec<f64> = out.iter().map(|r| r.revenue).collect();
        assert_eq!(revenues, vec![50.0, 100.0]);
    }

    #[test]
    fn date_descending() {
        let records = vec![
            record("2021-09-25", 365.8, 94.7),
            record("2023-09-30", 383.0, 97.0),
            record("2022-09-24", 394.0, 99.8),
        ];
        let spec = SortSpec::By {
            column: SortColumn::Date,
            direction: SortDirection::Descending,
        };
        let out = sort_records(&records, spec);
        let dates: Vec<String> = out.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-09-30", "2022-09-24", "2021-09-25"]);
    }

    #[test]
    fn ties_keep_source_order() {
        // Two records share a date but differ in revenue; sorting by date must
        // not swap them, in either direction.
        let records = vec![
            record("2022-01-01", 2.0, 0.0),
            record("2020-01-01", 9.0, 0.0),
            record("2022-01-01", 1.0, 0.0),
        ];
        let asc = sort_records(&records, SortSpec::ascending(SortColumn::Date));
        assert_eq!(asc[0].revenue, 9.0);
        assert_eq!(asc[1].revenue, 2.0);
        assert_eq!(asc[2].revenue, 1.0);

        let desc = sort_records(
            &records,
            SortSpec::By {
                column: SortColumn::Date,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(desc[0].revenue, 2.0);
        assert_eq!(desc[1].revenue, 1.0);
        assert_eq!(desc[2].revenue, 9.0);
    }

    #[test]
    fn descending_reverses_ascending_on_distinct_keys() {
        let records = vec![
            record("2021-01-01", 30.0, 0.0),
            record("2022-01-01", 10.0, 0.0),
            record("2023-01-01", 20.0, 0.0),
        ];
        let asc = sort_records(&records, SortSpec::ascending(SortColumn::Revenue));
        let desc = sort_records(
            &asc,
            SortSpec::By {
                column: SortColumn::Revenue,
                direction: SortDirection::Descending,
            },
        );
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn net_income_sort_handles_negatives() {
        let records = vec![
            record("2021-01-01", 0.0, 5.0),
            record("2022-01-01", 0.0, -12.0),
            record("2023-01-01", 0.0, 0.0),
        ];
        let out = sort_records(&records, SortSpec::ascending(SortColumn::NetIncome));
        let values: Vec<f64> = out.iter().map(|r| r.net_income).collect();
        assert_eq!(values, vec![-12.0, 0.0, 5.0]);
    }
}
