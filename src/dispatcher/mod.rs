//! Per-request pipeline: parse, encode, predict, resolve, respond.
//!
//! One inbound message drives one cycle. The caller's correlation token and
//! reply destination are threaded through untouched, the outbound reply is
//! published before the inbound message is acknowledged, and every path
//! acknowledges exactly once.

pub mod error;
pub mod mock;
pub mod predictor;


pub use error::{DispatchError, RequestError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockPredictor;
pub use predictor::{AmqpPredictor, PredictorClient};

use std::time::Duration;

use futures_util::StreamExt;
use lapin::message::Delivery;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel};

use crate::colleges::{CollegeIndex, RankedCollege, ResponseEnvelope};
use crate::encoder::{self, SurveyResponse};
use crate::schema::{FeatureSchema, SchemaSource, poll_schema_bytes};

/// The fixed payload returned for any unrecoverable per-request error.
pub const FAILURE_SENTINEL: &str = "{}";

/// Consumer tag used on the request queue.
const CONSUMER_TAG: &str = "predictor-preprocessor";

/// Drives request cycles against a schema source and a predictor.
pub struct Dispatcher<S, P> {
    schema_source: S,
    predictor: P,
    colleges: CollegeIndex,
    poll_interval: Duration,
}

impl<S, P> Dispatcher<S, P>
where
    S: SchemaSource,
    P: PredictorClient,
{
    pub fn new(
        schema_source: S,
        predictor: P,
        colleges: CollegeIndex,
        poll_interval: Duration,
    ) -> Self {
        Self {
            schema_source,
            predictor,
            colleges,
            poll_interval,
        }
    }

    /// Returns the predictor collaborator.
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Runs one full request cycle and returns the outbound payload: the
    /// result envelope, the empty envelope, or the failure sentinel.
    ///
    /// The schema is fetched fresh for every request, polling until the
    /// key exists.
    pub async fn handle_request(&self, body: &[u8]) -> String {
        let schema_bytes = poll_schema_bytes(&self.schema_source, self.poll_interval).await;

        match self.process(body, &schema_bytes).await {
            Ok(colleges) => match serde_json::to_string(&ResponseEnvelope { colleges }) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize response envelope");
                    FAILURE_SENTINEL.to_string()
                }
            },
            Err(e) if e.is_resolution_failure() => {
                tracing::warn!(error = %e, "returning empty result envelope");
                match serde_json::to_string(&ResponseEnvelope::empty()) {
                    Ok(payload) => payload,
                    Err(_) => FAILURE_SENTINEL.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "returning failure sentinel");
                FAILURE_SENTINEL.to_string()
            }
        }
    }

    async fn process(
        &self,
        body: &[u8],
        schema_bytes: &[u8],
    ) -> Result<Vec<RankedCollege>, RequestError> {
        let response: SurveyResponse = serde_json::from_slice(body)
            .map_err(|e| RequestError::MalformedDocument { source: e })?;
        let schema = FeatureSchema::parse(schema_bytes)?;

        let vector = encoder::encode(&response, &schema)?;
        tracing::debug!(vector = %vector, "requesting prediction");

        let reply = self.predictor.predict(vector.as_bytes()).await?;
        let reply = String::from_utf8(reply).map_err(|_| RequestError::NonUtf8Reply)?;
        tracing::debug!(reply = %reply, "prediction received");

        Ok(self.colleges.resolve(&reply)?)
    }

    /// Consumes the request queue until the channel closes.
    ///
    /// Prefetch is pinned to 1: at most one request is processed at a time,
    /// so the broker holds the backlog while a prediction is in flight.
    pub async fn run(&self, channel: &Channel, request_queue: &str) -> Result<(), DispatchError> {
        channel
            .basic_qos(1, BasicQosOptions::default())
            .await
            .map_err(|e| DispatchError::QosFailed {
                message: e.to_string(),
            })?;

        channel
            .queue_declare(
                request_queue,
                QueueDeclareOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| DispatchError::QueueDeclareFailed {
                queue: request_queue.to_string(),
                message: e.to_string(),
            })?;

        let mut consumer = channel
            .basic_consume(
                request_queue,
                CONSUMER_TAG,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| DispatchError::ConsumeFailed {
                queue: request_queue.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(queue = request_queue, "awaiting RPC requests");

        while let Some(attempt) = consumer.next().await {
            let delivery = match attempt {
                Ok(delivery) => delivery,
                Err(e) => {
                    tracing::warn!(error = %e, "request consumer error");
                    continue;
                }
            };

            tracing::info!(bytes = delivery.data.len(), "request received");
            let payload = self.handle_request(&delivery.data).await;
            self.respond_and_ack(channel, delivery, &payload).await?;
        }

        Ok(())
    }

    /// Publishes `payload` to the caller's reply destination with the
    /// caller's correlation token, then acknowledges the inbound message.
    /// Ack strictly follows the publish so a crash in between redelivers
    /// the request instead of losing it.
    async fn respond_and_ack(
        &self,
        channel: &Channel,
        delivery: Delivery,
        payload: &str,
    ) -> Result<(), DispatchError> {
        let reply_to = delivery
            .properties
            .reply_to()
            .as_ref()
            .map(|q| q.as_str().to_string());

        match reply_to {
            Some(reply_to) => {
                let mut properties = BasicProperties::default();
                if let Some(token) = delivery.properties.correlation_id() {
                    properties = properties.with_correlation_id(token.clone());
                }

                channel
                    .basic_publish(
                        "",
                        &reply_to,
                        BasicPublishOptions::default(),
                        payload.as_bytes(),
                        properties,
                    )
                    .await
                    .map_err(|e| DispatchError::ReplyPublishFailed {
                        reply_to: reply_to.clone(),
                        message: e.to_string(),
                    })?
                    .await
                    .map_err(|e| DispatchError::ReplyPublishFailed {
                        reply_to: reply_to.clone(),
                        message: e.to_string(),
                    })?;
            }
            None => {
                // Nothing to publish to; drop the reply rather than
                // redeliver a message we can never answer.
                tracing::error!("request carried no reply-to destination, dropping reply");
            }
        }

        delivery
            .acker
            .ack(BasicAckOptions::default())
            .await
            .map_err(|e| DispatchError::AckFailed {
                message: e.to_string(),
            })
    }
}
