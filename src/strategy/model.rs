use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::{ChallengePayload, RecognitionOutcome, Strategy};
use crate::error::EngineError;

/// Slot for a trained recognition model. No model ships with the service,
/// so every attempt reports failure. That is expected, not a fault.
pub struct ModelStrategy {
    model_dir: PathBuf,
}

impl ModelStrategy {
    pub const NAME: &'static str = "model";

    pub fn new(model_dir: PathBuf) -> Self {
        Self { model_dir }
    }
}

#[async_trait]
impl Strategy for ModelStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn attempt(&self, _payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError> {
        debug!(model_dir = %self.model_dir.display(), "no recognition model loaded");
        Ok(RecognitionOutcome::failed(Self::NAME))
    }
}
