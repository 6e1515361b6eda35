//! Statistical process control: Shewhart X-bar/R charts.
//!
//! Consumes subgrouped observations of one parameter and produces the
//! per-subgroup means/ranges, center lines, control limits, and (with
//! specification limits) short-term Cp/Cpk from the range-based sigma
//! estimate.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts.

mod factors;
mod xbar_r;

pub use factors::ChartFactors;
pub use xbar_r::{analyze, analyze_dataset, ControlChartResult, SpcRun, SubgroupPoint};
