use thiserror::Error;

use crate::colleges::CollegesError;
use crate::encoder::EncodeError;
use crate::rpc::RpcError;
use crate::schema::SchemaError;

/// Per-request failure causes.
///
/// The caller only ever sees one of two sentinel payloads, but the causes
/// stay distinguishable here so logs can tell malformed input from a
/// transport problem from a bad predictor reply.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The inbound payload did not decode into a survey response.
    #[error("malformed survey response: {source}")]
    MalformedDocument {
        #[source]
        source: serde_json::Error,
    },

    /// The fetched schema did not parse.
    #[error("malformed feature schema: {0}")]
    MalformedSchema(#[from] SchemaError),

    /// Encoding aborted on a structural lookup failure.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodeError),

    /// The prediction round trip failed.
    #[error("prediction round trip failed: {0}")]
    Prediction(#[from] RpcError),

    /// The predictor reply was not UTF-8.
    #[error("prediction reply was not valid UTF-8")]
    NonUtf8Reply,

    /// The predictor reply could not be mapped to college names.
    #[error("resolution failed: {0}")]
    Resolution(#[from] CollegesError),
}

impl RequestError {
    /// Resolution failures degrade to the empty envelope; everything else
    /// degrades to the failure sentinel.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::Resolution(_) | Self::NonUtf8Reply)
    }
}

/// Failures of the consume loop itself (not of one request).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Could not set the prefetch limit.
    #[error("failed to set prefetch limit: {message}")]
    QosFailed {
        /// Error message.
        message: String,
    },

    /// Could not declare the request queue.
    #[error("failed to declare request queue '{queue}': {message}")]
    QueueDeclareFailed {
        /// Queue name.
        queue: String,
        /// Error message.
        message: String,
    },

    /// Could not start consuming from the request queue.
    #[error("failed to consume from request queue '{queue}': {message}")]
    ConsumeFailed {
        /// Queue name.
        queue: String,
        /// Error message.
        message: String,
    },

    /// Publishing the outbound reply failed. The inbound message is left
    /// unacknowledged so the broker redelivers it.
    #[error("failed to publish reply to '{reply_to}': {message}")]
    ReplyPublishFailed {
        /// The caller's reply destination.
        reply_to: String,
        /// Error message.
        message: String,
    },

    /// Acknowledging the inbound message failed.
    #[error("failed to acknowledge request: {message}")]
    AckFailed {
        /// Error message.
        message: String,
    },
}
