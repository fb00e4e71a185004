#![cfg(any(test, feature = "mock"))]

use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::SchemaError;
use super::source::SchemaSource;

/// In-memory [`SchemaSource`] for tests.
///
/// Returns queued responses in order, then falls back to a fixed response
/// once the queue is drained.
#[derive(Default)]
pub struct MockSchemaSource {
    queued: Mutex<VecDeque<Option<Vec<u8>>>>,
    fallback: Option<Vec<u8>>,
}

impl MockSchemaSource {
    /// Source that always returns `bytes`.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: Some(bytes.into()),
        }
    }

    /// Source whose key never exists.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Queues a one-shot response ahead of the fallback.
    pub fn push_response(&self, response: Option<Vec<u8>>) {
        self.queued
            .lock()
            .expect("mock lock poisoned")
            .push_back(response);
    }
}

impl SchemaSource for MockSchemaSource {
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SchemaError> {
        let queued = self.queued.lock().expect("mock lock poisoned").pop_front();

        match queued {
            Some(response) => Ok(response),
            None => Ok(self.fallback.clone()),
        }
    }
}
