//! Regulatory standards table and K-factor weight derivation.
//!
//! Every parameter measured for the index has one positive reference
//! standard. The normalization constant is `K = 1 / sum(1 / s_i)` and each
//! parameter's weight is `w_i = K / s_i`, which makes the weights sum to 1:
//! an observation exactly at standard on every parameter scores a composite
//! index of exactly 100.

use crate::error::{AnalysisError, Result};

/// Ordered `(parameter, standard)` table. Standards are divisors, so every
/// value is validated strictly positive at construction.
///
/// # Examples
///
/// ```
/// use wq_analytics::wqi::StandardsTable;
///
/// let table = StandardsTable::new(vec![
///     ("MES".to_string(), 30.0),
///     ("DCO".to_string(), 90.0),
///     ("DBO5".to_string(), 30.0),
/// ]).unwrap();
///
/// let weights = table.weights();
/// let total: f64 = weights.iter().map(|(_, w)| w).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardsTable {
    entries: Vec<(String, f64)>,
}

impl StandardsTable {
    /// Validate and build a standards table.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyInput`] for an empty table.
    /// - [`AnalysisError::InvalidStandard`] for a non-finite or
    ///   non-positive standard — a zero or negative divisor would corrupt
    ///   every row, so the whole run is refused.
    /// - [`AnalysisError::DuplicateParameter`] when a parameter appears
    ///   twice; duplicates would double-count in the weight normalization.
    pub fn new(entries: Vec<(String, f64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnalysisError::EmptyInput {
                context: "standards table has no parameters",
            });
        }
        for (i, (parameter, standard)) in entries.iter().enumerate() {
            if !standard.is_finite() || *standard <= 0.0 {
                return Err(AnalysisError::InvalidStandard {
                    parameter: parameter.clone(),
                    value: *standard,
                });
            }
            if entries[..i].iter().any(|(seen, _)| seen == parameter) {
                return Err(AnalysisError::DuplicateParameter {
                    parameter: parameter.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The `(parameter, standard)` pairs in table order.
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// Parameter names in table order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The normalization constant `K = 1 / sum(1 / s_i)`.
    pub fn k_factor(&self) -> f64 {
        1.0 / self.entries.iter().map(|(_, s)| 1.0 / s).sum::<f64>()
    }

    /// Per-parameter weights `w_i = K / s_i`, in table order.
    ///
    /// The weights sum to 1 by construction.
    pub fn weights(&self) -> Vec<(String, f64)> {
        let k = self.k_factor();
        self.entries
            .iter()
            .map(|(name, standard)| (name.clone(), k / standard))
            .collect()
    }
}
