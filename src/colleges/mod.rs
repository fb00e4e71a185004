//! Static index-to-name college table and the rank resolver.
//!
//! The table is an immutable snapshot built once at startup from a
//! tab-separated reference file; positional index in file order is the
//! contract with the predictor. Resolution is fail-closed: one bad index
//! invalidates the whole ranked list.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::CollegesError;

use std::path::Path;

use serde::Serialize;

/// One entry of the ranked response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCollege {
    /// 1-based rank, in the predictor's output order.
    pub ranking: usize,
    /// College name from the reference table.
    pub name: String,
}

/// The outbound success envelope: `{"colleges": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    pub colleges: Vec<RankedCollege>,
}

impl ResponseEnvelope {
    /// The empty envelope sent when resolution fails.
    pub fn empty() -> Self {
        Self {
            colleges: Vec::new(),
        }
    }
}

/// Immutable position-to-name college lookup table.
#[derive(Debug, Clone)]
pub struct CollegeIndex {
    names: Vec<String>,
}

impl CollegeIndex {
    /// Loads the table from a tab-separated file.
    pub fn load(path: &Path) -> Result<Self, CollegesError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| CollegesError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::from_table(&contents))
    }

    /// Builds the table from the file contents. Every newline-separated
    /// line consumes an index slot, blank or malformed ones included; the
    /// name is the first tab-separated column.
    pub fn from_table(contents: &str) -> Self {
        let names = contents
            .split('\n')
            .map(|line| line.split('\t').next().unwrap_or_default().to_string())
            .collect();

        Self { names }
    }

    /// Looks up the name at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of index slots.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the table holds no slots.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Maps the predictor's comma-separated ranked indices to ordered
    /// `{ranking, name}` records.
    ///
    /// Fail-closed: any unparsable token or out-of-range index fails the
    /// entire resolution rather than returning a partially-wrong list.
    pub fn resolve(&self, reply: &str) -> Result<Vec<RankedCollege>, CollegesError> {
        let mut colleges = Vec::new();

        for (i, token) in reply.trim().split(',').enumerate() {
            let token = token.trim();
            let index: usize = token.parse().map_err(|e| CollegesError::UnparsableIndex {
                token: token.to_string(),
                source: e,
            })?;

            let name = self.get(index).ok_or(CollegesError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })?;

            colleges.push(RankedCollege {
                ranking: i + 1,
                name: name.to_string(),
            });
        }

        Ok(colleges)
    }
}
