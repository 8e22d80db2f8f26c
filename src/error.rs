use thiserror::Error;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input has no items where at least one is required.
    #[error("empty input")]
    EmptyInput,

    /// A point presented as defined has a NaN or infinite coordinate.
    #[error("non-finite coordinate at input {index}: ({x}, {y})")]
    NonFiniteCoordinate {
        /// Position of the offending point in the caller's input.
        index: usize,
        /// x coordinate as given.
        x: f64,
        /// y coordinate as given.
        y: f64,
    },

    /// The caller asked the run to stop; no partial tree is returned.
    #[error("clustering cancelled after {merges_completed} merges")]
    Cancelled {
        /// Merges performed before the stop request was observed.
        merges_completed: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A date column header could not be parsed as `m/d/yy`.
    #[error("invalid date header in column {column}: {value:?}")]
    InvalidDate {
        /// Zero-based column index.
        column: usize,
        /// Header text.
        value: String,
    },

    /// A case count cell is not a non-negative integer.
    #[error("invalid case count at row {row}, column {column}: {value:?}")]
    InvalidCount {
        /// Zero-based data row (header excluded).
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Cell text.
        value: String,
    },

    /// A data row does not have as many cells as the header.
    #[error("malformed row {row}: expected {expected} columns, found {found}")]
    MalformedRow {
        /// Zero-based data row (header excluded).
        row: usize,
        /// Header width.
        expected: usize,
        /// Row width.
        found: usize,
    },

    /// CSV decoding failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O failure while opening a table.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
