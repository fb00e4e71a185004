use std::time::Duration;

use redis::AsyncCommands;

use super::error::SchemaError;

/// Minimal async interface to the store holding the feature schema.
pub trait SchemaSource: Send + Sync {
    /// Fetches the raw schema bytes, or `None` if the key does not exist yet.
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, SchemaError>> + Send;
}

/// Schema source backed by a single Redis key.
#[derive(Clone)]
pub struct RedisSchemaSource {
    client: redis::Client,
    key: String,
}

impl RedisSchemaSource {
    /// Creates a source reading `key` from the Redis instance at `url`.
    pub fn new(url: &str, key: &str) -> Result<Self, SchemaError> {
        let client = redis::Client::open(url).map_err(|e| SchemaError::ConnectionFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            key: key.to_string(),
        })
    }

    /// Returns the configured key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SchemaSource for RedisSchemaSource {
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SchemaError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SchemaError::FetchFailed {
                key: self.key.clone(),
                message: e.to_string(),
            })?;

        let bytes: Option<Vec<u8>> =
            conn.get(&self.key)
                .await
                .map_err(|e| SchemaError::FetchFailed {
                    key: self.key.clone(),
                    message: e.to_string(),
                })?;

        Ok(bytes)
    }
}

/// Polls `source` until the schema key exists, sleeping `interval` between
/// attempts. Fetch failures are retried the same way: the store is an
/// infrastructure dependency assumed eventually available.
pub async fn poll_schema_bytes<S: SchemaSource>(source: &S, interval: Duration) -> Vec<u8> {
    loop {
        match source.fetch().await {
            Ok(Some(bytes)) => return bytes,
            Ok(None) => {
                tracing::debug!("schema key not found, trying again");
            }
            Err(e) => {
                tracing::warn!(error = %e, "schema fetch failed, trying again");
            }
        }

        tokio::time::sleep(interval).await;
    }
}
