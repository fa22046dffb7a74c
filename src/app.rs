//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches the income-statement dataset
//! - derives the filtered/sorted view
//! - prints the table or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, ViewArgs};
use crate::data::FmpClient;
use crate::domain::{FilterCriteria, FilterInputs, SortSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sv` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sv` and `sv -s MSFT` to behave like `sv tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Table(args) => handle_table(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_table(args: ViewArgs) -> Result<(), AppError> {
    let client = FmpClient::from_env()?;
    let raw = client.fetch_income_statements(&args.symbol, args.period)?;

    let criteria = FilterCriteria::from_inputs(&filter_inputs_from_args(&args));
    let spec = sort_spec_from_args(&args);
    let rows = pipeline::derive_view(&raw, &criteria, spec);

    print!(
        "{}",
        crate::report::format_view(&args.symbol, args.period, raw.len(), &rows, spec)
    );
    Ok(())
}

/// Collect the raw filter flag values; interpretation (including the
/// malformed-bound-disables-itself policy) stays in `FilterCriteria`.
pub fn filter_inputs_from_args(args: &ViewArgs) -> FilterInputs {
    FilterInputs {
        start_date: args.start_date.clone().unwrap_or_default(),
        end_date: args.end_date.clone().unwrap_or_default(),
        revenue_min: args.revenue_min.clone().unwrap_or_default(),
        revenue_max: args.revenue_max.clone().unwrap_or_default(),
        net_income_min: args.net_income_min.clone().unwrap_or_default(),
        net_income_max: args.net_income_max.clone().unwrap_or_default(),
    }
}

pub fn sort_spec_from_args(args: &ViewArgs) -> SortSpec {
    match args.sort {
        Some(column) => SortSpec::By {
            column,
            direction: args.direction,
        },
        None => SortSpec::Unsorted,
    }
}

/// Rewrite argv so `sv` defaults to `sv tui`.
///
/// Rules:
/// - `sv`                      -> `sv tui`
/// - `sv -s MSFT ...`          -> `sv tui -s MSFT ...`
/// - `sv --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "table" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortColumn, SortDirection};

    fn args_of(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args_of(&["sv"])), args_of(&["sv", "tui"]));
        assert_eq!(
            rewrite_args(args_of(&["sv", "-s", "MSFT"])),
            args_of(&["sv", "tui", "-s", "MSFT"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args_of(&["sv", "table", "--sort", "revenue"])),
            args_of(&["sv", "table", "--sort", "revenue"])
        );
        assert_eq!(rewrite_args(args_of(&["sv", "--help"])), args_of(&["sv", "--help"]));
        assert_eq!(rewrite_args(args_of(&["sv", "-V"])), args_of(&["sv", "-V"]));
    }

    #[test]
    fn sort_spec_from_flags() {
        let args = crate::cli::Cli::parse_from([
            "sv", "table", "--sort", "net-income", "--direction", "descending",
        ]);
        let Command::Table(args) = args.command else {
            panic!("expected table subcommand");
        };
        assert_eq!(
            sort_spec_from_args(&args),
            SortSpec::By {
                column: SortColumn::NetIncome,
                direction: SortDirection::Descending,
            }
        );

        let cli = crate::cli::Cli::parse_from(["sv", "table"]);
        let Command::Table(args) = cli.command else {
            panic!("expected table subcommand");
        };
        assert_eq!(sort_spec_from_args(&args), SortSpec::Unsorted);
    }
}
