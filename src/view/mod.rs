//! The filter/sort core.
//!
//! Both engines are pure functions of their inputs: they read the record
//! slice and the current criteria/spec, and return a new `Vec`. Nothing in
//! here touches the terminal, the network, or shared state, which is what
//! makes the view derivation safe to rerun on every keystroke.

pub mod filter;
pub mod sort;

pub use filter::filter_records;
pub use sort::sort_records;
