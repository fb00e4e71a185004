use thiserror::Error;

/// Errors returned by the correlated RPC client.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Could not open a channel on the broker connection.
    #[error("failed to open RPC channel: {message}")]
    ChannelFailed {
        /// Error message.
        message: String,
    },

    /// Could not declare the private reply queue.
    #[error("failed to declare private reply queue: {message}")]
    ReplyQueueFailed {
        /// Error message.
        message: String,
    },

    /// Could not start consuming from the private reply queue.
    #[error("failed to consume from reply queue '{queue}': {message}")]
    ConsumeFailed {
        /// Reply queue name.
        queue: String,
        /// Error message.
        message: String,
    },

    /// Publishing the request failed.
    #[error("failed to publish to '{routing_key}': {message}")]
    PublishFailed {
        /// Target routing key.
        routing_key: String,
        /// Error message.
        message: String,
    },

    /// The reply stream ended before a correlated reply arrived.
    #[error("reply queue closed before a correlated reply arrived")]
    ReplyChannelClosed,

    /// Channel teardown failed.
    #[error("failed to close RPC channel: {message}")]
    CloseFailed {
        /// Error message.
        message: String,
    },
}
