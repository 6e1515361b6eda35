//! Weighted Water Quality Index (WQI).
//!
//! A composite score over several measured parameters relative to
//! regulatory standards. Weights come from the K-factor normalization of
//! the standards table, so an observation exactly at standard on every
//! parameter scores exactly 100 — the Good/Poor boundary.
//!
//! # Pipeline
//!
//! 1. [`StandardsTable`] validates the reference limits and derives weights.
//! 2. [`compute_index`] turns one row into a composite index and
//!    per-parameter subtotals; [`classify`] labels it.
//! 3. [`contributions`] breaks the index into percentage shares.
//! 4. [`analyze`] runs all of it over a [`crate::data::Dataset`] and adds
//!    the run-level aggregates.

mod index;
mod standards;

pub use index::{
    analyze, classify, compute_index, contributions, RowIndex, WqiClass, WqiReport, WqiRow,
};
pub use standards::StandardsTable;
