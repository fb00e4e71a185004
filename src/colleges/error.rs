use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the college table or resolving predictor output.
#[derive(Debug, Error)]
pub enum CollegesError {
    /// The reference file could not be read.
    #[error("failed to read college table '{path}': {source}")]
    ReadFailed {
        /// File path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A predictor index token was not an integer.
    #[error("unparsable college index '{token}'")]
    UnparsableIndex {
        /// The offending token.
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A predictor index fell outside the table.
    #[error("college index {index} out of range (table holds {len} entries)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Table size.
        len: usize,
    },
}
