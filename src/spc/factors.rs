//! Control chart factor table for subgroup sizes 2..=10.
//!
//! The factors are a closed, historically tabulated set — there is no
//! formula fallback and no interpolation for other subgroup sizes. An
//! unlisted size is an explicit [`UnsupportedSubgroupSize`] failure at the
//! engine level.
//!
//! # References
//!
//! - ASTM E2587 — Standard Practice for Use of Control Charts in
//!   Statistical Process Control.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality
//!   Control*, 8th ed., Appendix Table VI.
//!
//! [`UnsupportedSubgroupSize`]: crate::AnalysisError::UnsupportedSubgroupSize

/// Shewhart X-bar/R factors for one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartFactors {
    /// X-bar chart limit factor: UCL/LCL = xbar_bar +/- A2 * r_bar.
    pub a2: f64,
    /// Mean of the range distribution: sigma_hat = r_bar / d2.
    pub d2: f64,
    /// R chart lower limit factor: LCL_R = D3 * r_bar. Zero for n <= 6,
    /// which already encodes the "no lower limit" convention — it is not
    /// clamped downstream.
    pub d3: f64,
    /// R chart upper limit factor: UCL_R = D4 * r_bar.
    pub d4: f64,
}

/// Factor table indexed by subgroup size minus 2.
const FACTORS: [ChartFactors; 9] = [
    // n = 2
    ChartFactors { a2: 1.880, d2: 1.128, d3: 0.0, d4: 3.267 },
    // n = 3
    ChartFactors { a2: 1.023, d2: 1.693, d3: 0.0, d4: 2.574 },
    // n = 4
    ChartFactors { a2: 0.729, d2: 2.059, d3: 0.0, d4: 2.282 },
    // n = 5
    ChartFactors { a2: 0.577, d2: 2.326, d3: 0.0, d4: 2.114 },
    // n = 6
    ChartFactors { a2: 0.483, d2: 2.534, d3: 0.0, d4: 2.004 },
    // n = 7
    ChartFactors { a2: 0.419, d2: 2.704, d3: 0.076, d4: 1.924 },
    // n = 8
    ChartFactors { a2: 0.373, d2: 2.847, d3: 0.136, d4: 1.864 },
    // n = 9
    ChartFactors { a2: 0.337, d2: 2.970, d3: 0.184, d4: 1.816 },
    // n = 10
    ChartFactors { a2: 0.308, d2: 3.078, d3: 0.223, d4: 1.777 },
];

impl ChartFactors {
    /// Look up the factors for a subgroup size, or `None` outside 2..=10.
    ///
    /// # Examples
    ///
    /// ```
    /// use wq_analytics::spc::ChartFactors;
    ///
    /// let f = ChartFactors::for_subgroup_size(5).unwrap();
    /// assert!((f.a2 - 0.577).abs() < f64::EPSILON);
    ///
    /// assert!(ChartFactors::for_subgroup_size(1).is_none());
    /// assert!(ChartFactors::for_subgroup_size(11).is_none());
    /// ```
    pub fn for_subgroup_size(n: usize) -> Option<&'static ChartFactors> {
        if (2..=10).contains(&n) {
            Some(&FACTORS[n - 2])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n5_factors_match_astm_table() {
        let f = ChartFactors::for_subgroup_size(5).unwrap();
        assert!((f.a2 - 0.577).abs() < f64::EPSILON);
        assert!((f.d2 - 2.326).abs() < f64::EPSILON);
        assert!(f.d3.abs() < f64::EPSILON);
        assert!((f.d4 - 2.114).abs() < f64::EPSILON);
    }

    #[test]
    fn n2_factors_match_astm_table() {
        let f = ChartFactors::for_subgroup_size(2).unwrap();
        assert!((f.a2 - 1.880).abs() < f64::EPSILON);
        assert!((f.d4 - 3.267).abs() < f64::EPSILON);
    }

    #[test]
    fn full_range_is_covered() {
        for n in 2..=10 {
            assert!(ChartFactors::for_subgroup_size(n).is_some(), "n = {n}");
        }
    }

    #[test]
    fn out_of_range_sizes_are_none() {
        for n in [0, 1, 11, 25] {
            assert!(ChartFactors::for_subgroup_size(n).is_none(), "n = {n}");
        }
    }

    #[test]
    fn d3_is_zero_through_n6_then_positive() {
        for n in 2..=6 {
            assert!(ChartFactors::for_subgroup_size(n).unwrap().d3.abs() < f64::EPSILON);
        }
        for n in 7..=10 {
            assert!(ChartFactors::for_subgroup_size(n).unwrap().d3 > 0.0);
        }
    }
}
