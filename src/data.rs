//! Tabular input model and specification limits.
//!
//! The engines consume a [`Dataset`]: rows keyed by a sample label (a date,
//! a subgroup id, or a plain row index) with named numeric columns whose
//! cells may be missing. Missing is distinct from zero — a zero cell is a
//! legitimate measurement.
//!
//! [`SpecLimits`] carries the externally supplied USL/LSL pair. Soliciting
//! and parsing those values (interactive prompting, retry loops) is the
//! caller's job; the core only enforces that at least one limit is present
//! and that the pair is ordered.

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// A named measurement column.
#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

/// An in-memory column store: one label per row, one `Option<f64>` cell per
/// row per column.
///
/// Column order is the order of insertion; row order is the input order and
/// is never resorted.
///
/// # Examples
///
/// ```
/// use wq_analytics::data::Dataset;
///
/// let mut ds = Dataset::new(vec!["01-03".into(), "02-03".into()]);
/// ds.add_column("MES", vec![Some(18.0), Some(22.0)]).unwrap();
/// ds.add_column("DCO", vec![Some(90.0), None]).unwrap();
///
/// assert_eq!(ds.len(), 2);
/// assert_eq!(ds.column("DCO").unwrap()[1], None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    labels: Vec<String>,
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset with the given row labels and no columns yet.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            columns: Vec::new(),
        }
    }

    /// Create a dataset with synthesized labels `"0"`, `"1"`, ... for
    /// callers whose input has no identifier column.
    pub fn with_row_indices(rows: usize) -> Self {
        Self::new((0..rows).map(|i| i.to_string()).collect())
    }

    /// Add a measurement column.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::LengthMismatch`] if `values` does not have exactly
    /// one cell per row.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if values.len() != self.labels.len() {
            return Err(AnalysisError::LengthMismatch {
                column: name,
                expected: self.labels.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row labels, in input order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column names, in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Cells of the named column, or `None` if no such column exists.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Group one column's rows into subgroups by row label.
    ///
    /// Subgroups appear in first-appearance order of their label; values
    /// within a subgroup keep row order. This mirrors grouping a tabular
    /// file by its `Sub-Groups` column.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::UnknownParameter`] if the column does not exist.
    /// - [`AnalysisError::MissingMeasurement`] if any grouped cell is
    ///   missing — a hole inside a subgroup would silently change the
    ///   subgroup statistics.
    pub fn subgroups(&self, column: &str) -> Result<Vec<Subgroup>> {
        let values = self
            .column(column)
            .ok_or_else(|| AnalysisError::UnknownParameter {
                parameter: column.to_string(),
            })?;

        let mut groups: Vec<Subgroup> = Vec::new();
        for (label, cell) in self.labels.iter().zip(values) {
            let value = cell.ok_or_else(|| AnalysisError::MissingMeasurement {
                parameter: column.to_string(),
                label: label.clone(),
            })?;
            match groups.iter_mut().find(|g| &g.id == label) {
                Some(group) => group.values.push(value),
                None => groups.push(Subgroup {
                    id: label.clone(),
                    values: vec![value],
                }),
            }
        }
        Ok(groups)
    }
}

/// An ordered batch of observations of one parameter sharing a subgroup id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subgroup {
    /// The subgroup identifier from the sample-label column.
    pub id: String,
    /// Observations in input order.
    pub values: Vec<f64>,
}

impl Subgroup {
    /// Convenience constructor, mostly for tests and direct callers that
    /// already hold subgrouped data.
    pub fn new(id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Specification limits
// ---------------------------------------------------------------------------

/// A validated USL/LSL pair. At least one limit is always present.
///
/// # Examples
///
/// ```
/// use wq_analytics::data::SpecLimits;
///
/// let two_sided = SpecLimits::new(Some(12.0), Some(8.0)).unwrap();
/// assert_eq!(two_sided.usl(), Some(12.0));
///
/// let upper_only = SpecLimits::new(Some(12.0), None).unwrap();
/// assert_eq!(upper_only.lsl(), None);
///
/// assert!(SpecLimits::new(None, None).is_err());
/// assert!(SpecLimits::new(Some(8.0), Some(12.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecLimits {
    usl: Option<f64>,
    lsl: Option<f64>,
}

impl SpecLimits {
    /// Validate and build a specification-limit pair.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::MissingSpecification`] if both limits are `None`.
    /// - [`AnalysisError::InvalidLimits`] if a limit is non-finite, or both
    ///   are present with `usl <= lsl`.
    pub fn new(usl: Option<f64>, lsl: Option<f64>) -> Result<Self> {
        if usl.is_none() && lsl.is_none() {
            return Err(AnalysisError::MissingSpecification);
        }
        let finite = |limit: Option<f64>| limit.map_or(true, f64::is_finite);
        if !finite(usl) || !finite(lsl) {
            return Err(AnalysisError::InvalidLimits { usl, lsl });
        }
        if let (Some(u), Some(l)) = (usl, lsl) {
            if u <= l {
                return Err(AnalysisError::InvalidLimits { usl, lsl });
            }
        }
        Ok(Self { usl, lsl })
    }

    /// Upper specification limit, if supplied.
    pub fn usl(&self) -> Option<f64> {
        self.usl
    }

    /// Lower specification limit, if supplied.
    pub fn lsl(&self) -> Option<f64> {
        self.lsl
    }

    /// `true` when both limits are present.
    pub fn is_two_sided(&self) -> bool {
        self.usl.is_some() && self.lsl.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
