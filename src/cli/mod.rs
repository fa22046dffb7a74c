//! Command-line parsing for the income-statement viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filter/sort core.

use clap::{Parser, Subcommand};

use crate::domain::{Period, SortColumn, SortDirection};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sv", version, about = "Income-statement table viewer (FMP-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch income statements, apply the given filters/sort, and print a table.
    Table(ViewArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same fetch and view-derivation pipeline as `sv table`,
    /// but lets you edit filter bounds and toggle column sorts live.
    Tui(ViewArgs),
}

/// Common options for both front-ends.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Ticker symbol to fetch income statements for.
    #[arg(short = 's', long, default_value = "AAPL")]
    pub symbol: String,

    /// Reporting period granularity.
    #[arg(short = 'p', long, value_enum, default_value_t = Period::Annual)]
    pub period: Period,

    /// Keep statements dated on or after this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Keep statements dated on or before this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Keep statements with revenue at or above this amount.
    #[arg(long, value_name = "AMOUNT")]
    pub revenue_min: Option<String>,

    /// Keep statements with revenue at or below this amount.
    #[arg(long, value_name = "AMOUNT")]
    pub revenue_max: Option<String>,

    /// Keep statements with net income at or above this amount.
    #[arg(long, value_name = "AMOUNT")]
    pub net_income_min: Option<String>,

    /// Keep statements with net income at or below this amount.
    #[arg(long, value_name = "AMOUNT")]
    pub net_income_max: Option<String>,

    /// Sort by this column (unsorted when omitted).
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort direction (only meaningful with --sort).
    #[arg(long, value_enum, default_value_t = SortDirection::Ascending)]
    pub direction: SortDirection,
}
