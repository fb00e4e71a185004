use thiserror::Error;

/// Errors returned by feature-schema fetching and parsing.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Could not open a client for the schema store.
    #[error("failed to connect to schema store at '{url}': {message}")]
    ConnectionFailed {
        /// Store URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// A fetch round trip to the schema store failed.
    #[error("failed to fetch schema key '{key}': {message}")]
    FetchFailed {
        /// Store key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Schema bytes were not valid UTF-8.
    #[error("schema is not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    /// A schema row had fewer than the two required columns.
    #[error("malformed schema row at line {line}: expected at least question_id and type_tag")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
    },

    /// The schema parsed to an empty mapping.
    #[error("schema contains no entries")]
    Empty,
}
