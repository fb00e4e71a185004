#![cfg(any(test, feature = "mock"))]

use std::sync::Mutex;

use super::predictor::PredictorClient;
use crate::rpc::RpcError;

/// In-memory [`PredictorClient`] for tests.
///
/// Records every vector it is asked to predict and returns either a fixed
/// reply or a transport failure.
pub struct MockPredictor {
    reply: Option<Vec<u8>>,
    calls: Mutex<Vec<Vec<u8>>>,
}

impl MockPredictor {
    /// Predictor that always returns `reply`.
    pub fn with_reply(reply: impl Into<Vec<u8>>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Predictor whose round trip always fails.
    pub fn unreachable() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Vectors received so far.
    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

impl PredictorClient for MockPredictor {
    async fn predict(&self, vector: &[u8]) -> Result<Vec<u8>, RpcError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(vector.to_vec());

        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(RpcError::ReplyChannelClosed),
        }
    }
}
