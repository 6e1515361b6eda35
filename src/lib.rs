//! # wq-analytics
//!
//! Water-quality index and statistical process control analytics.
//!
//! Three independent engines consume tabular measurement data and
//! externally supplied reference values, and produce typed result records:
//!
//! - [`wqi`] — Weighted Water Quality Index: K-factor weights from a
//!   standards table, per-row composite index, classification, and
//!   per-parameter contribution shares
//! - [`spc`] — Shewhart X-bar/R control charts with subgroup-size factors
//!   (n = 2..=10) and optional short-term capability (Cp/Cpk)
//! - [`capability`] — Long-term process performance (Pp/Ppk) from the
//!   overall population standard deviation
//!
//! The [`data`] module holds the shared tabular input model and the
//! validated specification-limit pair both SPC and capability consume.
//!
//! ## Design Philosophy
//!
//! - **Pure core**: every engine is a referentially transparent function of
//!   its inputs — no I/O, prompting, rendering, or file naming in here.
//!   Callers may run parameters in parallel without coordination.
//! - **Errors over NaN**: degenerate divisions (zero composite index, zero
//!   dispersion) are reported as explicit [`AnalysisError`] conditions
//!   instead of leaking NaN or infinity into downstream aggregates.
//! - **Scoped failures**: a bad row or parameter is marked inline in the
//!   result collections; only input-shape violations fail a whole run.

pub mod capability;
pub mod data;
pub mod error;
pub mod spc;
pub mod wqi;

pub use error::{AnalysisError, Result};
