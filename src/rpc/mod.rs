//! Correlated request/response over the broker.
//!
//! Each call publishes to a well-known queue with a fresh correlation token
//! and an exclusive, server-named reply queue, then suspends until the
//! reply carrying that token arrives. Replies with any other token belong
//! to a stale call and are discarded without being observed by the caller.

pub mod error;


pub use error::RpcError;

use std::time::Duration;

use futures_util::{Stream, StreamExt, pin_mut};
use lapin::options::{BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, Consumer};
use uuid::Uuid;

/// A reply observed on a private reply queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDelivery {
    /// Correlation token the reply carried, if any.
    pub correlation_id: Option<String>,
    /// Opaque reply payload.
    pub payload: Vec<u8>,
}

/// Resolves the first reply in `replies` whose correlation id equals
/// `token`, discarding everything else. Returns `None` if the stream ends
/// first.
///
/// This is the matching half of the RPC round trip, kept free of transport
/// concerns so it can be driven by any reply stream.
pub async fn await_reply<S>(replies: S, token: &str) -> Option<Vec<u8>>
where
    S: Stream<Item = ReplyDelivery>,
{
    pin_mut!(replies);

    while let Some(reply) = replies.next().await {
        match reply.correlation_id.as_deref() {
            Some(id) if id == token => return Some(reply.payload),
            other => {
                tracing::debug!(expected = token, received = ?other, "discarding uncorrelated reply");
            }
        }
    }

    None
}

/// Single-outstanding-call RPC client.
///
/// Owns a dedicated channel and an exclusive reply queue; the queue is
/// released when the client's channel closes (explicitly via [`close`] or
/// on drop). Callers needing concurrent calls open independent clients.
///
/// [`close`]: RpcClient::close
pub struct RpcClient {
    channel: Channel,
    consumer: Consumer,
    reply_queue: String,
    routing_key: String,
}

impl RpcClient {
    /// Opens a client that will publish to `routing_key` on the default
    /// exchange, listening on a fresh exclusive reply queue.
    pub async fn open(connection: &Connection, routing_key: &str) -> Result<Self, RpcError> {
        let channel =
            connection
                .create_channel()
                .await
                .map_err(|e| RpcError::ChannelFailed {
                    message: e.to_string(),
                })?;

        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| RpcError::ReplyQueueFailed {
                message: e.to_string(),
            })?;
        let reply_queue = queue.name().as_str().to_string();

        let consumer = channel
            .basic_consume(
                &reply_queue,
                "rpc-reply",
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| RpcError::ConsumeFailed {
                queue: reply_queue.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            channel,
            consumer,
            reply_queue,
            routing_key: routing_key.to_string(),
        })
    }

    /// Returns the private reply queue name.
    pub fn reply_queue(&self) -> &str {
        &self.reply_queue
    }

    /// Publishes `payload` and suspends until the correlated reply arrives.
    ///
    /// There is no timeout: a predictor that never replies stalls the
    /// calling flow until the process exits.
    pub async fn call(&mut self, payload: &[u8]) -> Result<Vec<u8>, RpcError> {
        let token = Uuid::new_v4().to_string();

        let properties = BasicProperties::default()
            .with_reply_to(self.reply_queue.clone().into())
            .with_correlation_id(token.clone().into());

        self.channel
            .basic_publish(
                "",
                &self.routing_key,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await
            .map_err(|e| RpcError::PublishFailed {
                routing_key: self.routing_key.clone(),
                message: e.to_string(),
            })?
            .await
            .map_err(|e| RpcError::PublishFailed {
                routing_key: self.routing_key.clone(),
                message: e.to_string(),
            })?;

        let replies = (&mut self.consumer).filter_map(|attempt| async {
            match attempt {
                Ok(delivery) => Some(ReplyDelivery {
                    correlation_id: delivery
                        .properties
                        .correlation_id()
                        .as_ref()
                        .map(|id| id.as_str().to_string()),
                    payload: delivery.data,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "reply consumer error");
                    None
                }
            }
        });

        await_reply(replies, &token)
            .await
            .ok_or(RpcError::ReplyChannelClosed)
    }

    /// Closes the channel, releasing the exclusive reply queue. Safe to
    /// skip: dropping the client tears the channel down with it.
    pub async fn close(self) -> Result<(), RpcError> {
        self.channel
            .close(200, "rpc client closed")
            .await
            .map_err(|e| RpcError::CloseFailed {
                message: e.to_string(),
            })
    }
}

/// Connects to the broker, retrying forever with a fixed backoff. The
/// broker is an infrastructure dependency assumed eventually available.
pub async fn connect_with_retry(url: &str, interval: Duration) -> Connection {
    loop {
        match Connection::connect(url, ConnectionProperties::default()).await {
            Ok(connection) => return connection,
            Err(e) => {
                tracing::warn!(error = %e, "could not connect to broker, retrying");
                tokio::time::sleep(interval).await;
            }
        }
    }
}
