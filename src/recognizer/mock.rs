use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{Charset, Delivery, Recognizer};
use crate::error::EngineError;

/// What the mock answers for a given charset.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    /// Engine ran, found nothing.
    Nothing,
    /// Engine binary missing.
    Unavailable,
}

/// A scripted recognizer for tests. Deterministic: the same charset always
/// gets the same answer. Unscripted charsets answer [`MockResponse::Nothing`].
#[derive(Default)]
pub struct MockRecognizer {
    responses: HashMap<Charset, MockResponse>,
    calls: Mutex<Vec<(Charset, Delivery)>>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `text` whenever `charset` is requested.
    pub fn with_text(mut self, charset: Charset, text: &str) -> Self {
        self.responses
            .insert(charset, MockResponse::Text(text.to_string()));
        self
    }

    pub fn with_response(mut self, charset: Charset, response: MockResponse) -> Self {
        self.responses.insert(charset, response);
        self
    }

    /// Every charset fails as if the engine were not installed.
    pub fn unavailable() -> Self {
        Self::new()
            .with_response(Charset::Alphanumeric, MockResponse::Unavailable)
            .with_response(Charset::Arithmetic, MockResponse::Unavailable)
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<(Charset, Delivery)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn recognize(
        &self,
        _image: &[u8],
        charset: Charset,
        delivery: Delivery,
    ) -> Result<Option<String>, EngineError> {
        self.calls.lock().unwrap().push((charset, delivery));
        match self.responses.get(&charset) {
            // Same contract as the real engine: trimmed, empty means nothing.
            Some(MockResponse::Text(text)) => {
                let text = text.trim();
                Ok((!text.is_empty()).then(|| text.to_string()))
            }
            Some(MockResponse::Nothing) | None => Ok(None),
            Some(MockResponse::Unavailable) => Err(EngineError::NotFound {
                path: PathBuf::from("mock-engine"),
            }),
        }
    }
}
