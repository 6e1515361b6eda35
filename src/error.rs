//! Crate-wide error type.
//!
//! One enum covers every reportable condition across the three engines.
//! Failures scoped to a single row or a single parameter are carried inline
//! in the result collections (see [`crate::wqi::WqiReport`] and the
//! per-parameter run types); only input-shape violations that make a whole
//! run meaningless are returned at the run level.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// All reportable analysis failures.
///
/// Variants carry enough payload (parameter name, row label, offending
/// value) for a caller to mark the affected cell in an emitted report
/// without re-deriving context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A standard value is missing, non-finite, or not strictly positive.
    ///
    /// Standards are divisors in the weight derivation, so a single bad
    /// entry corrupts every row; this fails the whole WQI run.
    #[error("invalid standard for parameter '{parameter}': {value} (must be finite and > 0)")]
    InvalidStandard { parameter: String, value: f64 },

    /// A row lacks a measurement for a parameter required by the analysis.
    ///
    /// Zero is a legitimate measured value; absence is not treated as zero.
    #[error("missing measurement for parameter '{parameter}' at sample '{label}'")]
    MissingMeasurement { parameter: String, label: String },

    /// Composite index is exactly zero, so contribution percentages are
    /// undefined for that row.
    #[error("composite index is zero at sample '{label}'; contributions are undefined")]
    DegenerateIndex { label: String },

    /// Subgroup cardinality outside the tabulated 2..=10 range.
    #[error("subgroup size {size} is not supported (tabulated sizes are 2..=10)")]
    UnsupportedSubgroupSize { size: usize },

    /// Subgroups for one parameter do not share a uniform size.
    #[error("subgroup '{id}' has {actual} observations, expected {expected}")]
    InconsistentSubgroupSize {
        id: String,
        expected: usize,
        actual: usize,
    },

    /// Neither USL nor LSL supplied where capability requires at least one.
    #[error("at least one specification limit (USL or LSL) is required")]
    MissingSpecification,

    /// USL and LSL are present but do not satisfy `usl > lsl`, or a limit
    /// is non-finite.
    #[error("invalid specification limits: USL {usl:?}, LSL {lsl:?}")]
    InvalidLimits { usl: Option<f64>, lsl: Option<f64> },

    /// Zero dispersion estimate where a capability ratio divides by it.
    ///
    /// Reported explicitly instead of propagating an infinite index into
    /// downstream aggregates.
    #[error("dispersion estimate is zero ({context}); capability ratios are undefined")]
    DegenerateVariance { context: &'static str },

    /// The same parameter appears twice in a standards table, which would
    /// double-count it in the weight normalization.
    #[error("parameter '{parameter}' appears more than once in the standards table")]
    DuplicateParameter { parameter: String },

    /// A requested parameter has no column in the dataset.
    #[error("parameter '{parameter}' has no column in the dataset")]
    UnknownParameter { parameter: String },

    /// Empty dataset, empty standards table, or an empty run request.
    #[error("empty input: {context}")]
    EmptyInput { context: &'static str },

    /// A column's length does not match the dataset's row count, or a
    /// row's cell slice does not match the standards-table size.
    #[error("'{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_embeds_parameter_and_value() {
        let err = AnalysisError::InvalidStandard {
            parameter: "DCO".into(),
            value: -3.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("DCO"), "message should name the parameter: {msg}");
        assert!(msg.contains("-3"), "message should embed the value: {msg}");
    }

    #[test]
    fn display_embeds_subgroup_sizes() {
        let err = AnalysisError::InconsistentSubgroupSize {
            id: "G7".into(),
            expected: 5,
            actual: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("G7"));
        assert!(msg.contains('5') && msg.contains('4'));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            AnalysisError::MissingSpecification,
            AnalysisError::MissingSpecification
        );
        assert_ne!(
            AnalysisError::UnsupportedSubgroupSize { size: 1 },
            AnalysisError::UnsupportedSubgroupSize { size: 11 }
        );
    }
}
