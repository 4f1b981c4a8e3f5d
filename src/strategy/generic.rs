use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{ChallengePayload, RecognitionOutcome, Strategy};
use crate::error::EngineError;
use crate::recognizer::{Charset, Delivery, Recognizer};

/// Plain text challenges: whatever alphanumeric text the engine reads.
pub struct GenericStrategy {
    recognizer: Arc<dyn Recognizer>,
}

impl GenericStrategy {
    pub const NAME: &'static str = "generic";

    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }
}

#[async_trait]
impl Strategy for GenericStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn attempt(&self, payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError> {
        let text = self
            .recognizer
            .recognize(payload.bytes(), Charset::Alphanumeric, Delivery::TempFile)
            .await?;

        Ok(match text {
            Some(text) => RecognitionOutcome::solved(Self::NAME, text),
            None => {
                debug!("no alphanumeric text recognized");
                RecognitionOutcome::failed(Self::NAME)
            }
        })
    }
}
