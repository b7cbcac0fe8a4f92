use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelStatError {
    #[error("Shape mismatch: X has {rows} rows but y has {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("Feature matrix has no rows")]
    EmptyInput,

    #[error("Feature matrix has no feature columns")]
    NoFeatures,

    #[error("Ragged rows: row {row} has {found} features, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Data length {found} does not match shape (expected {expected} values)")]
    DataLength { expected: usize, found: usize },

    #[error("Shape {rows} x {cols} overflows the addressable size")]
    ShapeOverflow { rows: usize, cols: usize },

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LabelStatError>;
