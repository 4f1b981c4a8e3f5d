//! Fixed-priority fallback over recognition strategies.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::evaluator::Evaluator;
use crate::recognizer::Recognizer;
use crate::recognizer::tesseract::TesseractEngine;
use crate::strategy::arithmetic::ArithmeticStrategy;
use crate::strategy::generic::GenericStrategy;
use crate::strategy::model::ModelStrategy;
use crate::strategy::{ChallengePayload, PayloadKind, RecognitionOutcome, Strategy};

/// Ordered strategies, tried one at a time until one succeeds.
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// generic → arithmetic → model.
    pub fn image(recognizer: Arc<dyn Recognizer>, config: &SolverConfig) -> Self {
        Self::new(vec![
            Arc::new(GenericStrategy::new(Arc::clone(&recognizer))),
            Arc::new(ArithmeticStrategy::new(
                recognizer,
                config.classifier,
                Evaluator::new(config.operators),
            )),
            Arc::new(ModelStrategy::new(config.model_dir.clone())),
        ])
    }

    /// No audio strategies exist yet; every payload comes back unsolved.
    pub fn audio() -> Self {
        Self::default()
    }

    /// Append a strategy with the lowest priority.
    pub fn push(&mut self, strategy: Arc<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run strategies in order and return the first success, or
    /// [`RecognitionOutcome::unsolved`]. Only infrastructure faults are errors.
    #[instrument(skip_all, fields(kind = %payload.kind(), bytes = payload.bytes().len()))]
    pub async fn solve(&self, payload: &ChallengePayload) -> Result<RecognitionOutcome, SolveError> {
        for strategy in &self.strategies {
            let name = strategy.name();
            debug!(strategy = name, "attempting");

            let outcome = strategy.attempt(payload).await.map_err(|source| {
                error!(strategy = name, error = %source, "recognition infrastructure fault");
                SolveError::Engine {
                    strategy: name.to_string(),
                    source,
                }
            })?;

            if outcome.succeeded {
                info!(strategy = name, "challenge solved");
                return Ok(outcome);
            }
        }

        info!("challenge unsolved");
        Ok(RecognitionOutcome::unsolved())
    }
}

/// Both chains, dispatched on the payload's declared kind. Immutable, so one
/// instance serves every request.
pub struct Solver {
    image: StrategyChain,
    audio: StrategyChain,
}

impl Solver {
    pub fn new(image: StrategyChain, audio: StrategyChain) -> Self {
        Self { image, audio }
    }

    /// Standard chains over the given recognizer.
    pub fn with_recognizer(recognizer: Arc<dyn Recognizer>, config: &SolverConfig) -> Self {
        Self::new(StrategyChain::image(recognizer, config), StrategyChain::audio())
    }

    /// Standard chains over the external engine described by `config`.
    pub fn from_config(config: &SolverConfig) -> Self {
        let engine = Arc::new(TesseractEngine::new(config.engine.clone()));
        Self::with_recognizer(engine, config)
    }

    pub fn chain(&self, kind: PayloadKind) -> &StrategyChain {
        match kind {
            PayloadKind::Image => &self.image,
            PayloadKind::Audio => &self.audio,
        }
    }

    pub async fn solve(&self, payload: &ChallengePayload) -> Result<RecognitionOutcome, SolveError> {
        self.chain(payload.kind()).solve(payload).await
    }
}
