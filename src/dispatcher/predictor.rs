use std::time::Duration;

use crate::rpc::{RpcClient, RpcError, connect_with_retry};

/// Minimal async interface to the prediction service.
pub trait PredictorClient: Send + Sync {
    /// Sends an encoded feature vector and returns the raw reply payload.
    fn predict(
        &self,
        vector: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<u8>, RpcError>> + Send;
}

/// Predictor reached over a correlated AMQP round trip.
///
/// Each prediction opens its own connection (retried forever with a fixed
/// backoff) and a fresh single-call [`RpcClient`], so every request gets a
/// private reply queue and correlation token of its own.
pub struct AmqpPredictor {
    url: String,
    queue: String,
    retry_interval: Duration,
}

impl AmqpPredictor {
    pub fn new(url: &str, queue: &str, retry_interval: Duration) -> Self {
        Self {
            url: url.to_string(),
            queue: queue.to_string(),
            retry_interval,
        }
    }
}

impl PredictorClient for AmqpPredictor {
    async fn predict(&self, vector: &[u8]) -> Result<Vec<u8>, RpcError> {
        let connection = connect_with_retry(&self.url, self.retry_interval).await;
        let mut client = RpcClient::open(&connection, &self.queue).await?;

        let reply = client.call(vector).await?;

        if let Err(e) = client.close().await {
            tracing::debug!(error = %e, "rpc client close failed");
        }

        Ok(reply)
    }
}
