//! Long-term process performance (Pp/Ppk) from a flat series.
//!
//! The long-term estimator deliberately uses the population standard
//! deviation (divide by `n`, not `n - 1`) of the overall series, as opposed
//! to the control chart's within-subgroup range estimate. Comparing the two
//! for the same parameter shows how much between-subgroup drift the process
//! carries.
//!
//! # Reference
//!
//! Montgomery (2019), *Introduction to Statistical Quality Control*,
//! 8th ed., Chapter 8.

use statrs::statistics::Statistics;

use super::estimator::{capability_indices, SigmaBasis};
use crate::data::{Dataset, SpecLimits};
use crate::error::{AnalysisError, Result};

/// Long-term performance record for one parameter.
///
/// With fewer than 2 retained values every statistic is `None` and `n`
/// reports the retained count as-is — an undefined result the caller
/// surfaces however it likes, not an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityResult {
    /// Count of non-missing values the statistics were computed from.
    pub n: usize,
    /// Arithmetic mean of the retained values.
    pub mean: Option<f64>,
    /// Population standard deviation of the retained values.
    pub std_dev: Option<f64>,
    /// Pp = (USL - LSL) / (6 sigma). `None` for one-sided limits or an
    /// undefined result.
    pub pp: Option<f64>,
    /// Ppk = min(Ppu, Ppl) over the supplied limits.
    pub ppk: Option<f64>,
    /// Echoed upper specification limit.
    pub usl: Option<f64>,
    /// Echoed lower specification limit.
    pub lsl: Option<f64>,
}

/// Compute Pp/Ppk for one parameter's series.
///
/// Missing values are discarded before anything else; zero is kept (it is
/// a measurement, not a hole).
///
/// # Errors
///
/// [`AnalysisError::DegenerateVariance`] when all retained values are
/// identical — every ratio would divide by zero.
///
/// # Examples
///
/// ```
/// use wq_analytics::capability::analyze;
/// use wq_analytics::data::SpecLimits;
///
/// let limits = SpecLimits::new(Some(12.0), Some(8.0)).unwrap();
/// let series = [Some(9.0), Some(10.0), None, Some(11.0)];
/// let result = analyze(&series, &limits).unwrap();
///
/// assert_eq!(result.n, 3);
/// assert!((result.mean.unwrap() - 10.0).abs() < 1e-12);
/// // Population std of [9, 10, 11] = sqrt(2/3) = 0.8165
/// assert!((result.pp.unwrap() - 0.8165).abs() < 1e-4);
/// assert!((result.ppk.unwrap() - 0.8165).abs() < 1e-4);
/// ```
pub fn analyze(values: &[Option<f64>], limits: &SpecLimits) -> Result<CapabilityResult> {
    let retained: Vec<f64> = values.iter().copied().flatten().collect();
    let n = retained.len();

    if n < 2 {
        return Ok(CapabilityResult {
            n,
            mean: None,
            std_dev: None,
            pp: None,
            ppk: None,
            usl: limits.usl(),
            lsl: limits.lsl(),
        });
    }

    let mean = retained.as_slice().mean();
    let std_dev = retained.as_slice().population_std_dev();

    let indices = capability_indices(mean, SigmaBasis::SampleBased { std_dev }, limits)?;

    Ok(CapabilityResult {
        n,
        mean: Some(mean),
        std_dev: Some(std_dev),
        pp: indices.spread,
        ppk: Some(indices.centered),
        usl: limits.usl(),
        lsl: limits.lsl(),
    })
}

/// Combined Pp/Ppk table across parameters: one entry per requested
/// parameter, per-parameter failures carried inline.
#[derive(Debug, Clone)]
pub struct CapabilityRun {
    /// `(parameter, outcome)` in request order.
    pub parameters: Vec<(String, Result<CapabilityResult>)>,
}

/// Run the long-term capability analysis over several dataset columns.
///
/// A failure for one parameter (unknown column, degenerate variance) is
/// recorded in its slot and does not stop the remaining parameters.
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] if the dataset has no rows or `specs`
/// names no parameters — the run itself is meaningless.
pub fn analyze_dataset(
    dataset: &Dataset,
    specs: &[(String, SpecLimits)],
) -> Result<CapabilityRun> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "dataset has no rows",
        });
    }
    if specs.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "no parameters requested for capability analysis",
        });
    }

    let parameters = specs
        .iter()
        .map(|(name, limits)| {
            let outcome = match dataset.column(name) {
                Some(series) => analyze(series, limits),
                None => Err(AnalysisError::UnknownParameter {
                    parameter: name.clone(),
                }),
            };
            (name.clone(), outcome)
        })
        .collect();

    Ok(CapabilityRun { parameters })
}
