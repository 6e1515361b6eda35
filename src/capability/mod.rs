//! Process capability and performance analysis.
//!
//! Two dispersion estimators feed one set of formulas:
//!
//! - [`SigmaBasis::RangeBased`] — short-term sigma from the control chart's
//!   average range (`r_bar / d2`), producing Cp/Cpk (used by [`crate::spc`]).
//! - [`SigmaBasis::SampleBased`] — long-term sigma from the overall
//!   population standard deviation, producing Pp/Ppk ([`analyze`]).
//!
//! Result shapes are identical across the two, so short- and long-term
//! indices for the same parameter compare directly.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod estimator;
mod performance;

pub use estimator::{capability_indices, CapabilityIndices, SigmaBasis};
pub use performance::{analyze, analyze_dataset, CapabilityResult, CapabilityRun};
