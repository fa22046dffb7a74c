//! Dataset provider integration.
//!
//! The core never fetches anything itself; this module is the one-shot
//! collaborator that turns the provider's response into a `Vec<IncomeRecord>`.

pub mod fmp;

pub use fmp::FmpClient;
