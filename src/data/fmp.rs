//! Financial Modeling Prep API integration for income statements.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{IncomeRecord, Period};
use crate::error::AppError;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3/income-statement";

pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FMP_API_KEY")
            .map_err(|_| AppError::config("Missing FMP_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch all income statements for `symbol` at the given period.
    ///
    /// The provider returns statements most-recent-first; that order is kept
    /// as the session's source order. A failed transport, a non-success
    /// status, or an unparseable body all surface as an `AppError` — the
    /// caller decides whether that means "exit" (one-shot table) or "keep the
    /// previous dataset and show a message" (TUI).
    pub fn fetch_income_statements(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<IncomeRecord>, AppError> {
        let url = format!("{BASE_URL}/{}", symbol.trim().to_ascii_uppercase());
        let resp = self
            .client
            .get(&url)
            .query(&[("period", period.query_value()), ("apikey", &self.api_key)])
            .send()
            .map_err(|e| AppError::data(format!("FMP request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "FMP request failed with status {}.",
                resp.status()
            )));
        }

        let body: Vec<StatementRow> = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse FMP response: {e}")))?;

        Ok(rows_to_records(body))
    }
}

/// Convert raw provider rows into records, skipping rows without a valid date.
///
/// Amount fields default to 0 when absent or unparseable; the date is the
/// row's identity and a row without one is useless to the viewer.
fn rows_to_records(rows: Vec<StatementRow>) -> Vec<IncomeRecord> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Ok(date) = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d") else {
            continue;
        };
        out.push(IncomeRecord {
            date,
            revenue: row.revenue.amount(),
            net_income: row.net_income.amount(),
            gross_profit: row.gross_profit.amount(),
            eps: row.eps.amount(),
            operating_income: row.operating_income.amount(),
        });
    }
    out
}

/// One statement object from the provider, with only the columns we render.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementRow {
    date: String,
    #[serde(default)]
    revenue: AmountField,
    #[serde(default)]
    net_income: AmountField,
    #[serde(default)]
    gross_profit: AmountField,
    #[serde(default)]
    eps: AmountField,
    #[serde(default)]
    operating_income: AmountField,
}

/// A numeric field the provider may serialize as a number, a string, or null.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum AmountField {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl AmountField {
    fn amount(&self) -> f64 {
        match self {
            AmountField::Number(v) if v.is_finite() => *v,
            AmountField::Text(s) => parse_amount(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
