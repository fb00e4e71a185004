//! Predictor-preprocessor library crate (used by the service binary and
//! integration tests).
//!
//! The service sits between the survey front-end and the prediction engine:
//!
//! 1. a survey response arrives on the well-known request queue;
//! 2. the [`encoder`] turns it into a canonical feature vector, driven by
//!    the [`schema`] fetched per request from the key-value store;
//! 3. the [`rpc`] client sends the vector to the predictor and waits for
//!    the correlated reply;
//! 4. the [`colleges`] resolver maps the ranked indices to names;
//! 5. the [`dispatcher`] replies to the original caller and acknowledges
//!    the request.
//!
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod colleges;
pub mod config;
pub mod dispatcher;
pub mod encoder;
pub mod rpc;
pub mod schema;

pub use colleges::{CollegeIndex, CollegesError, RankedCollege, ResponseEnvelope};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use dispatcher::MockPredictor;
pub use dispatcher::{
    AmqpPredictor, DispatchError, Dispatcher, FAILURE_SENTINEL, PredictorClient, RequestError,
};
pub use encoder::{EncodeError, Page, Question, QuestionKind, SurveyResponse, encode};
pub use rpc::{ReplyDelivery, RpcClient, RpcError, await_reply, connect_with_retry};
#[cfg(any(test, feature = "mock"))]
pub use schema::MockSchemaSource;
pub use schema::{
    FeatureEntry, FeatureSchema, FeatureType, RedisSchemaSource, SchemaError, SchemaSource,
    poll_schema_bytes,
};
