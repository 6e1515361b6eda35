//! Shewhart X-bar/R analysis for subgrouped data.
//!
//! # Algorithm
//!
//! 1. For each subgroup, compute the mean (X-bar) and range (R = max - min).
//! 2. Center lines: `xbar_bar` = mean of subgroup means, `r_bar` = mean of
//!    subgroup ranges.
//! 3. Look up [`ChartFactors`] for the subgroup size (2..=10, closed table).
//! 4. X-bar limits: `xbar_bar +/- A2 * r_bar`; R limits: `D4 * r_bar` and
//!    `D3 * r_bar`.
//! 5. With specification limits supplied, the short-term sigma `r_bar / d2`
//!    feeds the shared capability math to produce Cp/Cpk.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality
//!   Control*, 8th ed., Chapter 6.
//! - Shewhart, W.A. (1931). *Economic Control of Quality of Manufactured
//!   Product*.

use statrs::statistics::Statistics;

use super::factors::ChartFactors;
use crate::capability::{capability_indices, CapabilityIndices, SigmaBasis};
use crate::data::{Dataset, SpecLimits, Subgroup};
use crate::error::{AnalysisError, Result};

/// One plotted point: the statistics of one subgroup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubgroupPoint {
    /// Subgroup identifier, as grouped from the sample-label column.
    pub id: String,
    /// Subgroup mean (X-bar).
    pub mean: f64,
    /// Subgroup range (max - min).
    pub range: f64,
}

/// Full X-bar/R analysis for one parameter.
///
/// `subgroup_size` is carried in the result on purpose: it selects every
/// factor in the limit computation, so a caller auditing the output must
/// be able to see which size was inferred from the data.
#[derive(Debug, Clone)]
pub struct ControlChartResult {
    /// Per-subgroup means and ranges, in input order, for charting.
    pub points: Vec<SubgroupPoint>,
    /// Grand mean of subgroup means (X-bar-bar center line).
    pub xbar_bar: f64,
    /// Mean of subgroup ranges (R-bar center line).
    pub r_bar: f64,
    /// X-bar chart upper control limit.
    pub ucl_xbar: f64,
    /// X-bar chart lower control limit.
    pub lcl_xbar: f64,
    /// R chart upper control limit.
    pub ucl_r: f64,
    /// R chart lower control limit (zero for n <= 6 per the factor table).
    pub lcl_r: f64,
    /// The subgroup size the factors were looked up for.
    pub subgroup_size: usize,
    /// Echoed specification limits, when supplied.
    pub limits: Option<SpecLimits>,
    /// Short-term Cp/Cpk. `None` when no specification limits were
    /// supplied; `Some(Err(DegenerateVariance))` when they were but
    /// `r_bar` is zero. The chart statistics above stay valid either way.
    pub capability: Option<Result<CapabilityIndices>>,
}

impl ControlChartResult {
    /// Cp, when limits were supplied, both-sided, and the variance was not
    /// degenerate.
    pub fn cp(&self) -> Option<f64> {
        match &self.capability {
            Some(Ok(idx)) => idx.spread,
            _ => None,
        }
    }

    /// Cpk under the same conditions (one-sided limits included).
    pub fn cpk(&self) -> Option<f64> {
        match &self.capability {
            Some(Ok(idx)) => Some(idx.centered),
            _ => None,
        }
    }
}

/// Analyze an ordered sequence of subgroups for one parameter.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] with no subgroups at all.
/// - [`AnalysisError::InconsistentSubgroupSize`] when subgroups differ in
///   cardinality — fatal for this parameter, the inferred size would be
///   meaningless.
/// - [`AnalysisError::UnsupportedSubgroupSize`] outside the tabulated
///   2..=10 range.
///
/// # Examples
///
/// ```
/// use wq_analytics::data::Subgroup;
/// use wq_analytics::spc::analyze;
///
/// let subgroups = vec![
///     Subgroup::new("G1", vec![1.0, 3.0]),
///     Subgroup::new("G2", vec![5.0, 7.0]),
/// ];
/// let result = analyze(&subgroups, None).unwrap();
///
/// assert_eq!(result.subgroup_size, 2);
/// assert!((result.xbar_bar - 4.0).abs() < 1e-12);
/// assert!((result.r_bar - 2.0).abs() < 1e-12);
/// // A2(n=2) = 1.880: UCL = 4 + 1.880 * 2 = 7.76
/// assert!((result.ucl_xbar - 7.76).abs() < 1e-12);
/// ```
pub fn analyze(
    subgroups: &[Subgroup],
    limits: Option<&SpecLimits>,
) -> Result<ControlChartResult> {
    let first = subgroups.first().ok_or(AnalysisError::EmptyInput {
        context: "no subgroups to analyze",
    })?;

    let subgroup_size = first.values.len();
    for group in subgroups {
        if group.values.len() != subgroup_size {
            return Err(AnalysisError::InconsistentSubgroupSize {
                id: group.id.clone(),
                expected: subgroup_size,
                actual: group.values.len(),
            });
        }
    }
    let factors = ChartFactors::for_subgroup_size(subgroup_size).ok_or(
        AnalysisError::UnsupportedSubgroupSize {
            size: subgroup_size,
        },
    )?;

    let points: Vec<SubgroupPoint> = subgroups
        .iter()
        .map(|group| {
            let values = group.values.as_slice();
            SubgroupPoint {
                id: group.id.clone(),
                mean: values.mean(),
                range: values.max() - values.min(),
            }
        })
        .collect();

    let means: Vec<f64> = points.iter().map(|p| p.mean).collect();
    let ranges: Vec<f64> = points.iter().map(|p| p.range).collect();
    let xbar_bar = means.as_slice().mean();
    let r_bar = ranges.as_slice().mean();

    let capability = limits.map(|l| {
        capability_indices(
            xbar_bar,
            SigmaBasis::RangeBased {
                r_bar,
                d2: factors.d2,
            },
            l,
        )
    });

    Ok(ControlChartResult {
        points,
        xbar_bar,
        r_bar,
        ucl_xbar: xbar_bar + factors.a2 * r_bar,
        lcl_xbar: xbar_bar - factors.a2 * r_bar,
        ucl_r: factors.d4 * r_bar,
        lcl_r: factors.d3 * r_bar,
        subgroup_size,
        limits: limits.copied(),
        capability,
    })
}

/// Combined X-bar/R run across parameters, per-parameter failures inline.
#[derive(Debug, Clone)]
pub struct SpcRun {
    /// `(parameter, outcome)` in request order.
    pub parameters: Vec<(String, Result<ControlChartResult>)>,
}

/// Analyze several dataset columns, grouping each by the sample label.
///
/// A failure for one parameter (unknown column, missing cell, bad subgroup
/// shape) is recorded in its slot and does not stop the others.
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] if the dataset has no rows or `specs`
/// names no parameters.
pub fn analyze_dataset(
    dataset: &Dataset,
    specs: &[(String, Option<SpecLimits>)],
) -> Result<SpcRun> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "dataset has no rows",
        });
    }
    if specs.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "no parameters requested for control chart analysis",
        });
    }

    let parameters = specs
        .iter()
        .map(|(name, limits)| {
            let outcome = dataset
                .subgroups(name)
                .and_then(|groups| analyze(&groups, limits.as_ref()));
            (name.clone(), outcome)
        })
        .collect();

    Ok(SpcRun { parameters })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups_of(values: &[&[f64]]) -> Vec<Subgroup> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Subgroup::new(format!("G{}", i + 1), v.to_vec()))
            .collect()
    }

    // --- Chart statistics ---

    /// Contract scenario: subgroups [(1,3), (5,7)] with n = 2 factors.
    #[test]
    fn n2_scenario_matches_hand_computation() {
        let subgroups = groups_of(&[&[1.0, 3.0], &[5.0, 7.0]]);
        let result = analyze(&subgroups, None).unwrap();

        assert_eq!(result.subgroup_size, 2);
        assert_eq!(result.points[0].mean, 2.0);
        assert_eq!(result.points[1].mean, 6.0);
        assert_eq!(result.points[0].range, 2.0);
        assert_eq!(result.points[1].range, 2.0);
        assert!((result.xbar_bar - 4.0).abs() < 1e-12);
        assert!((result.r_bar - 2.0).abs() < 1e-12);
        // A2 = 1.880, D4 = 3.267, D3 = 0
        assert!((result.ucl_xbar - 7.76).abs() < 1e-12);
        assert!((result.lcl_xbar - 0.24).abs() < 1e-12);
        assert!((result.ucl_r - 6.534).abs() < 1e-12);
        assert!(result.lcl_r.abs() < f64::EPSILON);
        assert!(result.capability.is_none(), "no limits requested");
    }

    /// Equal means and ranges collapse the X-bar limits onto the center.
    #[test]
    fn uniform_subgroups_collapse_limits() {
        // n = 5: every subgroup has mean 50, range 10.
        let subgroups = groups_of(&[
            &[45.0, 47.0, 50.0, 53.0, 55.0],
            &[45.0, 47.0, 50.0, 53.0, 55.0],
            &[45.0, 47.0, 50.0, 53.0, 55.0],
        ]);
        let result = analyze(&subgroups, None).unwrap();

        assert!((result.xbar_bar - 50.0).abs() < 1e-12);
        assert!((result.r_bar - 10.0).abs() < 1e-12);
        // A2(5) = 0.577
        assert!((result.ucl_xbar - 55.77).abs() < 1e-10);
        assert!((result.lcl_xbar - 44.23).abs() < 1e-10);
        // D4(5) = 2.114, D3(5) = 0
        assert!((result.ucl_r - 21.14).abs() < 1e-10);
        assert!(result.lcl_r.abs() < f64::EPSILON);
    }

    #[test]
    fn points_keep_input_order() {
        let subgroups = vec![
            Subgroup::new("late", vec![9.0, 11.0]),
            Subgroup::new("early", vec![1.0, 3.0]),
        ];
        let result = analyze(&subgroups, None).unwrap();
        assert_eq!(result.points[0].id, "late");
        assert_eq!(result.points[1].id, "early");
    }

    // --- Shape validation ---

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            analyze(&[], None),
            Err(AnalysisError::EmptyInput { .. })
        ));
    }

    #[test]
    fn inconsistent_sizes_are_fatal_for_the_parameter() {
        let subgroups = vec![
            Subgroup::new("G1", vec![1.0, 2.0, 3.0]),
            Subgroup::new("G2", vec![4.0, 5.0]),
        ];
        let err = analyze(&subgroups, None).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InconsistentSubgroupSize {
                id: "G2".into(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn subgroup_size_outside_table_is_rejected() {
        let ones = groups_of(&[&[1.0], &[2.0]]);
        assert!(matches!(
            analyze(&ones, None),
            Err(AnalysisError::UnsupportedSubgroupSize { size: 1 })
        ));

        let eleven: Vec<f64> = (0..11).map(f64::from).collect();
        let big = vec![Subgroup::new("G1", eleven)];
        assert!(matches!(
            analyze(&big, None),
            Err(AnalysisError::UnsupportedSubgroupSize { size: 11 })
        ));
    }

    // --- Capability from the range-based sigma ---

    #[test]
    fn two_sided_limits_produce_cp_and_cpk() {
        // n = 5, r_bar = 10 => sigma = 10 / 2.326
        let subgroups = groups_of(&[
            &[45.0, 47.0, 50.0, 53.0, 55.0],
            &[45.0, 47.0, 50.0, 53.0, 55.0],
        ]);
        let limits = SpecLimits::new(Some(70.0), Some(30.0)).unwrap();
        let result = analyze(&subgroups, Some(&limits)).unwrap();

        let sigma = 10.0 / 2.326;
        assert!((result.cp().unwrap() - 40.0 / (6.0 * sigma)).abs() < 1e-10);
        // Centered at 50, so Cpu == Cpl == Cpk.
        assert!((result.cpk().unwrap() - 20.0 / (3.0 * sigma)).abs() < 1e-10);
    }

    #[test]
    fn one_sided_limits_produce_cpk_only() {
        let subgroups = groups_of(&[&[8.0, 12.0], &[9.0, 11.0]]);
        let limits = SpecLimits::new(Some(16.0), None).unwrap();
        let result = analyze(&subgroups, Some(&limits)).unwrap();

        assert!(result.cp().is_none(), "Cp is not applicable one-sided");
        // xbar_bar = 10, r_bar = 3, sigma = 3 / 1.128
        let sigma = 3.0 / 1.128;
        assert!((result.cpk().unwrap() - 6.0 / (3.0 * sigma)).abs() < 1e-10);
    }

    #[test]
    fn zero_rbar_degenerates_capability_but_keeps_chart() {
        let subgroups = groups_of(&[&[5.0, 5.0], &[5.0, 5.0]]);
        let limits = SpecLimits::new(Some(6.0), Some(4.0)).unwrap();
        let result = analyze(&subgroups, Some(&limits)).unwrap();

        // Chart statistics still valid: limits collapse onto the center.
        assert!((result.xbar_bar - 5.0).abs() < f64::EPSILON);
        assert!((result.ucl_xbar - 5.0).abs() < f64::EPSILON);
        assert!(matches!(
            result.capability,
            Some(Err(AnalysisError::DegenerateVariance { .. }))
        ));
        assert!(result.cp().is_none());
        assert!(result.cpk().is_none());
    }

    // --- Dataset runs ---

    #[test]
    fn dataset_run_groups_by_label_and_isolates_failures() {
        let mut ds = Dataset::new(vec![
            "G1".into(),
            "G1".into(),
            "G2".into(),
            "G2".into(),
        ]);
        ds.add_column("flow", vec![Some(1.0), Some(3.0), Some(5.0), Some(7.0)])
            .unwrap();
        ds.add_column("ph", vec![Some(7.0), None, Some(7.2), Some(7.1)])
            .unwrap();

        let specs = vec![
            ("flow".to_string(), None),
            ("ph".to_string(), None),
            ("absent".to_string(), None),
        ];
        let run = analyze_dataset(&ds, &specs).unwrap();

        let flow = run.parameters[0].1.as_ref().unwrap();
        assert!((flow.xbar_bar - 4.0).abs() < 1e-12);
        assert!(matches!(
            run.parameters[1].1,
            Err(AnalysisError::MissingMeasurement { .. })
        ));
        assert!(matches!(
            run.parameters[2].1,
            Err(AnalysisError::UnknownParameter { .. })
        ));
    }
}
