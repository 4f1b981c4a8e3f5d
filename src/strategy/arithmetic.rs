use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{ChallengePayload, RecognitionOutcome, Strategy};
use crate::classifier::{Classifier, probe_dimensions};
use crate::error::EngineError;
use crate::evaluator::{Evaluator, has_operator};
use crate::recognizer::{Charset, Delivery, Recognizer};

/// Math challenges: small images showing `<int><op><int>`. Reports the
/// computed value, never the expression itself.
pub struct ArithmeticStrategy {
    recognizer: Arc<dyn Recognizer>,
    classifier: Classifier,
    evaluator: Evaluator,
}

impl ArithmeticStrategy {
    pub const NAME: &'static str = "arithmetic";

    pub fn new(recognizer: Arc<dyn Recognizer>, classifier: Classifier, evaluator: Evaluator) -> Self {
        Self {
            recognizer,
            classifier,
            evaluator,
        }
    }
}

#[async_trait]
impl Strategy for ArithmeticStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn attempt(&self, payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError> {
        let failed = RecognitionOutcome::failed(Self::NAME);

        // An undecodable image only rules out this strategy.
        let dims = match probe_dimensions(payload.bytes()) {
            Ok(dims) => dims,
            Err(e) => {
                debug!(error = %e, "skipping arithmetic strategy");
                return Ok(failed);
            }
        };

        if !self.classifier.classify(dims).is_arithmetic_candidate {
            debug!(width = dims.width, height = dims.height, "not an arithmetic candidate");
            return Ok(failed);
        }

        let Some(text) = self
            .recognizer
            .recognize(payload.bytes(), Charset::Arithmetic, Delivery::Stdin)
            .await?
        else {
            return Ok(failed);
        };

        if !has_operator(&text) {
            debug!(text = %text, "no operator in recognized text");
            return Ok(failed);
        }

        Ok(match self.evaluator.evaluate(&text) {
            Some(result) => RecognitionOutcome::solved(Self::NAME, result),
            None => {
                debug!(text = %text, "expression did not evaluate");
                failed
            }
        })
    }
}
