use thiserror::Error;

/// Whole-batch failures of the core. Per-spot degeneracies are carried as data
/// on the measurements instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("{stage}: expected {expected} coordinates (rows x cols), got {actual}")]
    StructuralMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid grid parameter: {0}")]
    InvalidParameter(String),
}
