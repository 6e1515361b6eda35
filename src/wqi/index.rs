//! Composite index computation, classification, and contribution shares.
//!
//! For each observation row: quality rating `q_i = (c_i / s_i) * 100`,
//! weighted subtotal `q_i * w_i`, composite index = sum of subtotals.
//! Classification thresholds and the contribution-percentage breakdown are
//! pure functions of those values.

use crate::data::Dataset;
use crate::error::{AnalysisError, Result};

use super::standards::StandardsTable;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Water quality classification of a composite index value.
///
/// The intervals are half-open with boundaries belonging to the upper
/// (worse) class: 50 is `Good`, 100 is `Poor`, 200 is `Unsuitable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WqiClass {
    /// Index below 50.
    Excellent,
    /// Index in `[50, 100)`.
    Good,
    /// Index in `[100, 200)`.
    Poor,
    /// Index of 200 or above.
    Unsuitable,
}

impl std::fmt::Display for WqiClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WqiClass::Excellent => "Excellent",
            WqiClass::Good => "Good",
            WqiClass::Poor => "Poor",
            WqiClass::Unsuitable => "Unsuitable",
        };
        f.write_str(label)
    }
}

/// Classify a composite index value.
///
/// # Examples
///
/// ```
/// use wq_analytics::wqi::{classify, WqiClass};
///
/// assert_eq!(classify(49.9), WqiClass::Excellent);
/// assert_eq!(classify(50.0), WqiClass::Good);
/// assert_eq!(classify(100.0), WqiClass::Poor);
/// assert_eq!(classify(200.0), WqiClass::Unsuitable);
/// ```
pub fn classify(index: f64) -> WqiClass {
    if index < 50.0 {
        WqiClass::Excellent
    } else if index < 100.0 {
        WqiClass::Good
    } else if index < 200.0 {
        WqiClass::Poor
    } else {
        WqiClass::Unsuitable
    }
}

// ---------------------------------------------------------------------------
// Per-row computation
// ---------------------------------------------------------------------------

/// Composite index of one row together with its per-parameter subtotals.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIndex {
    /// The composite index: sum of the weighted subtotals.
    pub index: f64,
    /// `(parameter, q_i * w_i)` in standards-table order.
    pub subtotals: Vec<(String, f64)>,
}

/// Compute the composite index for one observation row.
///
/// `cells` pairs positionally with the standards-table entries: `cells[i]`
/// is the measured value of the table's i-th parameter.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if `cells` does not have exactly
///   one entry per standards parameter — a truncated row would yield a
///   quietly wrong index.
/// - [`AnalysisError::MissingMeasurement`] if any cell is absent or
///   non-finite — zero is a legitimate measurement, absence is not
///   treated as zero.
pub fn compute_index(
    label: &str,
    cells: &[Option<f64>],
    standards: &StandardsTable,
) -> Result<RowIndex> {
    if cells.len() != standards.len() {
        return Err(AnalysisError::LengthMismatch {
            column: label.to_string(),
            expected: standards.len(),
            actual: cells.len(),
        });
    }

    let k = standards.k_factor();
    let mut subtotals = Vec::with_capacity(standards.len());
    let mut index = 0.0;

    for ((parameter, standard), cell) in standards.entries().iter().zip(cells) {
        let value = match cell {
            Some(v) if v.is_finite() => *v,
            _ => {
                return Err(AnalysisError::MissingMeasurement {
                    parameter: parameter.clone(),
                    label: label.to_string(),
                })
            }
        };
        let rating = (value / standard) * 100.0;
        let subtotal = rating * (k / standard);
        index += subtotal;
        subtotals.push((parameter.clone(), subtotal));
    }

    Ok(RowIndex { index, subtotals })
}

/// Per-parameter contribution percentages of one row.
///
/// # Errors
///
/// [`AnalysisError::DegenerateIndex`] when the composite index is exactly
/// zero (every measured value was zero) — the shares are undefined and
/// must not be emitted as NaN.
pub fn contributions(label: &str, row: &RowIndex) -> Result<Vec<(String, f64)>> {
    if row.index == 0.0 {
        return Err(AnalysisError::DegenerateIndex {
            label: label.to_string(),
        });
    }
    Ok(row
        .subtotals
        .iter()
        .map(|(parameter, subtotal)| (parameter.clone(), subtotal / row.index * 100.0))
        .collect())
}

// ---------------------------------------------------------------------------
// Dataset run
// ---------------------------------------------------------------------------

/// One analyzed observation row.
#[derive(Debug, Clone)]
pub struct WqiRow {
    /// The row's sample label.
    pub label: String,
    /// Composite index.
    pub index: f64,
    /// Classification of the composite index.
    pub class: WqiClass,
    /// Per-parameter contribution percentages, or the row's
    /// [`AnalysisError::DegenerateIndex`] marker when the index is zero.
    pub contributions: Result<Vec<(String, f64)>>,
}

/// Full WQI run over a dataset: per-row results plus run aggregates.
#[derive(Debug, Clone)]
pub struct WqiReport {
    /// One entry per dataset row, input order. A row that cannot be
    /// computed (missing measurement) carries its error inline; it does
    /// not abort the other rows.
    pub rows: Vec<Result<WqiRow>>,
    /// Mean composite index over the rows that computed, `None` when none
    /// did.
    pub run_average: Option<f64>,
    /// Per-parameter mean contribution percentage over the rows with
    /// defined contributions, standards-table order.
    pub average_contributions: Vec<(String, Option<f64>)>,
}

/// Run the weighted-index analysis over every row of a dataset.
///
/// Run-fatal conditions are an empty dataset and a standards parameter
/// with no dataset column; everything row-scoped is reported inline.
///
/// # Examples
///
/// ```
/// use wq_analytics::data::Dataset;
/// use wq_analytics::wqi::{analyze, StandardsTable, WqiClass};
///
/// let mut ds = Dataset::new(vec!["05-03-2024".into()]);
/// ds.add_column("A", vec![Some(10.0)]).unwrap();
/// ds.add_column("B", vec![Some(20.0)]).unwrap();
/// ds.add_column("C", vec![Some(5.0)]).unwrap();
///
/// let standards = StandardsTable::new(vec![
///     ("A".to_string(), 10.0),
///     ("B".to_string(), 20.0),
///     ("C".to_string(), 5.0),
/// ]).unwrap();
///
/// let report = analyze(&ds, &standards).unwrap();
/// let row = report.rows[0].as_ref().unwrap();
/// // Every value is exactly at standard: the index is exactly 100,
/// // which belongs to the upper interval.
/// assert!((row.index - 100.0).abs() < 1e-12);
/// assert_eq!(row.class, WqiClass::Poor);
/// ```
pub fn analyze(dataset: &Dataset, standards: &StandardsTable) -> Result<WqiReport> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyInput {
            context: "dataset has no rows",
        });
    }

    // Resolve every standards parameter to its column up front; a missing
    // column is a run-shape violation, not a per-row condition.
    let columns: Vec<&[Option<f64>]> = standards
        .parameters()
        .map(|parameter| {
            dataset
                .column(parameter)
                .ok_or_else(|| AnalysisError::UnknownParameter {
                    parameter: parameter.to_string(),
                })
        })
        .collect::<Result<_>>()?;

    let rows: Vec<Result<WqiRow>> = dataset
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cells: Vec<Option<f64>> = columns.iter().map(|col| col[i]).collect();
            let row = compute_index(label, &cells, standards)?;
            Ok(WqiRow {
                label: label.clone(),
                index: row.index,
                class: classify(row.index),
                contributions: contributions(label, &row),
            })
        })
        .collect();

    let computed: Vec<&WqiRow> = rows.iter().filter_map(|r| r.as_ref().ok()).collect();
    let run_average = if computed.is_empty() {
        None
    } else {
        Some(computed.iter().map(|r| r.index).sum::<f64>() / computed.len() as f64)
    };

    let average_contributions = standards
        .parameters()
        .enumerate()
        .map(|(p, parameter)| {
            let shares: Vec<f64> = computed
                .iter()
                .filter_map(|r| r.contributions.as_ref().ok())
                .map(|c| c[p].1)
                .collect();
            let mean = if shares.is_empty() {
                None
            } else {
                Some(shares.iter().sum::<f64>() / shares.len() as f64)
            };
            (parameter.to_string(), mean)
        })
        .collect();

    Ok(WqiReport {
        rows,
        run_average,
        average_contributions,
    })
}
