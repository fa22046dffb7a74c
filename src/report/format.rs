//! Fixed-width text rendering of the derived view.

use crate::domain::{IncomeRecord, Period, SortColumn, SortSpec};

/// Format the run header plus the record table.
pub fn format_view(
    symbol: &str,
    period: Period,
    raw_count: usize,
    rows: &[IncomeRecord],
    spec: SortSpec,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== sv - Income Statements ({}, {}) ===\n",
        symbol.trim().to_ascii_uppercase(),
        period.query_value(),
    ));
    out.push_str(&format!("Rows: {} of {} fetched\n", rows.len(), raw_count));
    out.push_str(&format!("Sort: {}\n\n", fmt_sort(spec)));

    out.push_str(&format_table(rows, spec));
    out
}

/// Format the record table with sort indicators in the column headers.
pub fn format_table(rows: &[IncomeRecord], spec: SortSpec) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<12} {:>20} {:>20} {:>20} {:>20} {:>8}\n",
            header_label("Date", Some(SortColumn::Date), spec),
            header_label("Revenue", Some(SortColumn::Revenue), spec),
            header_label("Net Income", Some(SortColumn::NetIncome), spec),
            header_label("Gross Profit", None, spec),
            header_label("Op. Income", None, spec),
            "EPS",
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<12} {:-<20} {:-<20} {:-<20} {:-<20} {:-<8}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<12} {:>20} {:>20} {:>20} {:>20} {:>8.2}\n",
                r.date,
                fmt_usd(r.revenue),
                fmt_usd(r.net_income),
                fmt_usd(r.gross_profit),
                fmt_usd(r.operating_income),
                r.eps,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_sort(spec: SortSpec) -> String {
    match spec {
        SortSpec::Unsorted => "source order".to_string(),
        SortSpec::By { column, direction } => {
            format!("{} {:?}", column.label(), direction).to_lowercase()
        }
    }
}

fn header_label(name: &str, column: Option<SortColumn>, spec: SortSpec) -> String {
    let indicator = column
        .and_then(|c| spec.direction_for(c))
        .map(|d| match d {
            crate::domain::SortDirection::Ascending => " ^",
            crate::domain::SortDirection::Descending => " v",
        })
        .unwrap_or("");
    format!("{name}{indicator}")
}

/// Dollar amount with thousands grouping, rounded to whole dollars.
pub fn fmt_usd(v: f64) -> String {
    let rounded = v.round();
    if !rounded.is_finite() || rounded.abs() >= 1e18 {
        return format!("${v:.0}");
    }
    let dollars = rounded as i64;
    let sign = if dollars < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars.unsigned_abs()))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let rem = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(rem.to_string());
            break;
        }
        groups.push(format!("{rem:03}"));
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;
    use chrono::NaiveDate;

    fn record(date: &str, revenue: f64, net_income: f64) -> IncomeRecord {
        IncomeRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            revenue,
            net_income,
            gross_profit: 2.0 * net_income,
            eps: 6.16,
            operating_income: net_income,
        }
    }

    #[test]
    fn usd_grouping() {
        assert_eq!(fmt_usd(0.0), "$0");
        assert_eq!(fmt_usd(999.0), "$999");
        assert_eq!(fmt_usd(1000.0), "$1,000");
        assert_eq!(fmt_usd(383_285_000_000.0), "$383,285,000,000");
        assert_eq!(fmt_usd(-2_500.4), "-$2,500");
    }

    #[test]
    fn table_contains_rows_and_sort_indicator() {
        let rows = vec![record("2023-09-30", 383_285_000_000.0, 96_995_000_000.0)];
        let spec = SortSpec::By {
            column: SortColumn::Revenue,
            direction: SortDirection::Descending,
        };
        let table = format_table(&rows, spec);

        assert!(table.contains("Revenue v"));
        assert!(!table.contains("Date ^"));
        assert!(table.contains("2023-09-30"));
        assert!(table.contains("$383,285,000,000"));
        assert!(table.contains("$96,995,000,000"));
        assert!(table.contains("6.16"));
    }

    #[test]
    fn view_header_reports_counts() {
        let rows = vec![record("2023-09-30", 1.0, 1.0)];
        let out = format_view("aapl", Period::Annual, 5, &rows, SortSpec::Unsorted);
        assert!(out.contains("(AAPL, annual)"));
        assert!(out.contains("Rows: 1 of 5 fetched"));
        assert!(out.contains("Sort: source order"));
    }
}
