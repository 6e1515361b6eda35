//! Shared capability-ratio math.
//!
//! Short-term Cp/Cpk (control chart, range-based sigma) and long-term
//! Pp/Ppk (overall population sigma) are the same formulas fed by two
//! different dispersion estimators. Both engines route through
//! [`capability_indices`] so the formulas cannot drift apart.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*,
//!   8th ed., Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality
//!   Technology* 18(1), pp. 41--52.

use crate::data::SpecLimits;
use crate::error::{AnalysisError, Result};

/// How the process dispersion was estimated.
///
/// The two variants correspond to the two families of indices:
///
/// - [`SigmaBasis::RangeBased`] — short-term (within-subgroup) sigma from
///   the average range, `sigma = r_bar / d2`. Produces Cp/Cpk.
/// - [`SigmaBasis::SampleBased`] — long-term (overall) sigma, the
///   population standard deviation of the raw series. Produces Pp/Ppk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SigmaBasis {
    /// Sigma estimated from the average subgroup range and the d2 factor.
    RangeBased { r_bar: f64, d2: f64 },
    /// Sigma is the overall population standard deviation, precomputed by
    /// the caller.
    SampleBased { std_dev: f64 },
}

impl SigmaBasis {
    /// The dispersion estimate this basis yields.
    pub fn sigma(&self) -> f64 {
        match *self {
            SigmaBasis::RangeBased { r_bar, d2 } => r_bar / d2,
            SigmaBasis::SampleBased { std_dev } => std_dev,
        }
    }
}

/// Capability ratios computed against one [`SpecLimits`] pair.
///
/// `spread` is the Cp/Pp-like two-sided ratio and is `None` for one-sided
/// specifications ("not applicable", never silently zero). `centered` is
/// the Cpk/Ppk-like ratio and is always defined: the minimum of the two
/// one-sided ratios when both limits are present, the single applicable
/// ratio otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityIndices {
    /// Cp or Pp: `(USL - LSL) / (6 sigma)`. Requires both limits.
    pub spread: Option<f64>,
    /// Cpk or Ppk: `min(upper, lower)` over the supplied limits.
    pub centered: f64,
    /// Upper one-sided ratio: `(USL - center) / (3 sigma)`.
    pub upper: Option<f64>,
    /// Lower one-sided ratio: `(center - LSL) / (3 sigma)`.
    pub lower: Option<f64>,
}

/// Compute capability ratios for a process centered at `center` with the
/// dispersion described by `basis`.
///
/// # Errors
///
/// [`AnalysisError::DegenerateVariance`] when the dispersion estimate is
/// zero or non-finite — the ratios would be division by zero and must be
/// reported, not emitted as infinity.
///
/// # Examples
///
/// ```
/// use wq_analytics::capability::{capability_indices, SigmaBasis};
/// use wq_analytics::data::SpecLimits;
///
/// let limits = SpecLimits::new(Some(12.0), Some(8.0)).unwrap();
/// let basis = SigmaBasis::SampleBased { std_dev: 1.0 };
/// let idx = capability_indices(10.0, basis, &limits).unwrap();
///
/// // Pp = (12 - 8) / 6 and the process is perfectly centered.
/// assert!((idx.spread.unwrap() - 4.0 / 6.0).abs() < 1e-12);
/// assert!((idx.centered - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn capability_indices(
    center: f64,
    basis: SigmaBasis,
    limits: &SpecLimits,
) -> Result<CapabilityIndices> {
    let sigma = basis.sigma();
    if !sigma.is_finite() || sigma <= 0.0 {
        let context = match basis {
            SigmaBasis::RangeBased { .. } => "r_bar / d2",
            SigmaBasis::SampleBased { .. } => "population standard deviation",
        };
        return Err(AnalysisError::DegenerateVariance { context });
    }

    let upper = limits.usl().map(|u| (u - center) / (3.0 * sigma));
    let lower = limits.lsl().map(|l| (center - l) / (3.0 * sigma));
    let spread = match (limits.usl(), limits.lsl()) {
        (Some(u), Some(l)) => Some((u - l) / (6.0 * sigma)),
        _ => None,
    };
    // SpecLimits guarantees at least one limit, so `centered` always exists.
    let centered = match (upper, lower) {
        (Some(u), Some(l)) => u.min(l),
        (Some(u), None) => u,
        (None, Some(l)) => l,
        (None, None) => unreachable!("SpecLimits::new enforces at least one limit"),
    };

    Ok(CapabilityIndices {
        spread,
        centered,
        upper,
        lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sided() -> SpecLimits {
        SpecLimits::new(Some(220.0), Some(200.0)).unwrap()
    }

    // --- SigmaBasis ---

    #[test]
    fn range_based_sigma_is_rbar_over_d2() {
        let basis = SigmaBasis::RangeBased {
            r_bar: 2.326,
            d2: 2.326,
        };
        assert!((basis.sigma() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sample_based_sigma_passes_through() {
        let basis = SigmaBasis::SampleBased { std_dev: 0.5 };
        assert!((basis.sigma() - 0.5).abs() < f64::EPSILON);
    }

    // --- Two-sided ratios ---

    /// Montgomery (2019), Example 8.1: Cp = (220 - 200) / (6 * 2) = 1.6667.
    #[test]
    fn two_sided_textbook_example() {
        let basis = SigmaBasis::SampleBased { std_dev: 2.0 };
        let idx = capability_indices(210.0, basis, &two_sided()).unwrap();
        assert!((idx.spread.unwrap() - 1.6667).abs() < 1e-3);
        // Centered process: Cpu == Cpl == Cpk.
        assert!((idx.upper.unwrap() - idx.lower.unwrap()).abs() < 1e-12);
        assert!((idx.centered - 1.6667).abs() < 1e-3);
    }

    #[test]
    fn off_center_takes_minimum_ratio() {
        let basis = SigmaBasis::SampleBased { std_dev: 2.0 };
        let idx = capability_indices(215.0, basis, &two_sided()).unwrap();
        // upper = (220-215)/6 = 0.8333, lower = (215-200)/6 = 2.5
        assert!((idx.upper.unwrap() - 0.8333).abs() < 1e-3);
        assert!((idx.lower.unwrap() - 2.5).abs() < 1e-3);
        assert!((idx.centered - idx.upper.unwrap()).abs() < 1e-15);
    }

    // --- One-sided ratios ---

    #[test]
    fn usl_only_has_no_spread() {
        let limits = SpecLimits::new(Some(10.0), None).unwrap();
        let basis = SigmaBasis::SampleBased { std_dev: 1.0 };
        let idx = capability_indices(7.0, basis, &limits).unwrap();
        assert!(idx.spread.is_none(), "spread requires both limits");
        assert!(idx.lower.is_none());
        assert!((idx.centered - 1.0).abs() < 1e-12); // (10-7)/3
    }

    #[test]
    fn lsl_only_uses_lower_ratio() {
        let limits = SpecLimits::new(None, Some(4.0)).unwrap();
        let basis = SigmaBasis::SampleBased { std_dev: 1.0 };
        let idx = capability_indices(7.0, basis, &limits).unwrap();
        assert!(idx.spread.is_none());
        assert!(idx.upper.is_none());
        assert!((idx.centered - 1.0).abs() < 1e-12); // (7-4)/3
    }

    // --- Degenerate dispersion ---

    #[test]
    fn zero_sigma_is_reported_not_infinite() {
        let basis = SigmaBasis::SampleBased { std_dev: 0.0 };
        let err = capability_indices(10.0, basis, &two_sided()).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateVariance { .. }));
    }

    #[test]
    fn zero_rbar_is_reported() {
        let basis = SigmaBasis::RangeBased {
            r_bar: 0.0,
            d2: 2.326,
        };
        let err = capability_indices(10.0, basis, &two_sided()).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateVariance { .. }));
    }

    #[test]
    fn nan_sigma_is_reported() {
        let basis = SigmaBasis::SampleBased {
            std_dev: f64::NAN,
        };
        assert!(capability_indices(10.0, basis, &two_sided()).is_err());
    }
}
