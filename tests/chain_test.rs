use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};

use tessera::chain::{Solver, StrategyChain};
use tessera::config::SolverConfig;
use tessera::error::{EngineError, SolveError};
use tessera::evaluator::OperatorSet;
use tessera::recognizer::mock::{MockRecognizer, MockResponse};
use tessera::recognizer::{Charset, Delivery};
use tessera::strategy::{ChallengePayload, RecognitionOutcome, Strategy};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn solver(mock: &Arc<MockRecognizer>, config: &SolverConfig) -> Solver {
    Solver::with_recognizer(mock.clone(), config)
}

fn baseline(mock: &Arc<MockRecognizer>) -> Solver {
    solver(mock, &SolverConfig::default())
}

// ── End-to-end scenarios ──────────────────────────────────────────

#[tokio::test]
async fn large_image_solved_by_generic() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Alphanumeric, "ABC123"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(1920, 1080)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::solved("generic", "ABC123"));
    assert_eq!(mock.calls(), vec![(Charset::Alphanumeric, Delivery::TempFile)]);
}

#[tokio::test]
async fn generic_output_is_trimmed() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Alphanumeric, "  XY7\n"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(640, 480)))
        .await
        .unwrap();

    assert_eq!(outcome.text, "XY7");
}

#[tokio::test]
async fn small_image_falls_back_to_arithmetic() {
    let mock = Arc::new(
        MockRecognizer::new()
            .with_text(Charset::Alphanumeric, "")
            .with_text(Charset::Arithmetic, "7+5"),
    );
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::solved("arithmetic", "12"));
    assert_eq!(
        mock.calls(),
        vec![
            (Charset::Alphanumeric, Delivery::TempFile),
            (Charset::Arithmetic, Delivery::Stdin),
        ]
    );
}

#[tokio::test]
async fn unsupported_operator_falls_through_to_unsolved() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "7*5"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert!(!outcome.succeeded);
    assert_eq!(outcome.strategy, "none");
    assert!(outcome.text.is_empty());
}

#[tokio::test]
async fn multiplication_solved_when_all_operators_enabled() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "7*5"));
    let config = SolverConfig {
        operators: OperatorSet::All,
        ..SolverConfig::default()
    };
    let outcome = solver(&mock, &config)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::solved("arithmetic", "35"));
}

// ── Arithmetic strategy fall-through ──────────────────────────────

#[tokio::test]
async fn large_image_skips_arithmetic_engine_call() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "7+5"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(1920, 1080)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::unsolved());
    assert_eq!(mock.calls(), vec![(Charset::Alphanumeric, Delivery::TempFile)]);
}

#[tokio::test]
async fn undecodable_image_does_not_abort_chain() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "7+5"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(b"not an image at all".to_vec()))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::unsolved());
}

#[tokio::test]
async fn expression_without_operator_is_unsolved() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "75"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::unsolved());
}

#[tokio::test]
async fn three_operands_are_unsolved() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "1+2+3"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::unsolved());
}

// ── Infrastructure faults ─────────────────────────────────────────

#[tokio::test]
async fn missing_engine_is_an_error_not_unsolved() {
    let mock = Arc::new(MockRecognizer::unavailable());
    let err = baseline(&mock)
        .solve(&ChallengePayload::image(png(1920, 1080)))
        .await
        .unwrap_err();

    match err {
        SolveError::Engine { strategy, source } => {
            assert_eq!(strategy, "generic");
            assert!(matches!(source, EngineError::NotFound { .. }));
        }
    }
}

#[tokio::test]
async fn fault_in_arithmetic_strategy_is_reported_by_name() {
    let mock = Arc::new(
        MockRecognizer::new().with_response(Charset::Arithmetic, MockResponse::Unavailable),
    );
    let err = baseline(&mock)
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("arithmetic strategy"));
}

// ── Chain properties ──────────────────────────────────────────────

#[tokio::test]
async fn repeated_solves_are_identical() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Arithmetic, "20+22"));
    let solver = baseline(&mock);
    let payload = ChallengePayload::image(png(120, 40));

    let first = solver.solve(&payload).await.unwrap();
    let second = solver.solve(&payload).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.text, "42");
}

#[tokio::test]
async fn audio_chain_is_always_unsolved() {
    let mock = Arc::new(MockRecognizer::new().with_text(Charset::Alphanumeric, "ABC123"));
    let outcome = baseline(&mock)
        .solve(&ChallengePayload::audio(b"RIFF....WAVE".to_vec()))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::unsolved());
    assert!(mock.calls().is_empty());
}

#[test]
fn image_chain_order() {
    let mock = Arc::new(MockRecognizer::new());
    let chain = StrategyChain::image(mock, &SolverConfig::default());
    assert_eq!(chain.names(), vec!["generic", "arithmetic", "model"]);
}

/// Succeeds with a fixed answer; stands in for a future strategy.
struct FixedStrategy;

#[async_trait]
impl Strategy for FixedStrategy {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn attempt(&self, _payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError> {
        Ok(RecognitionOutcome::solved("fixed", "OK"))
    }
}

#[tokio::test]
async fn appended_strategy_runs_after_builtins() {
    let mock = Arc::new(MockRecognizer::new());
    let mut chain = StrategyChain::image(mock.clone(), &SolverConfig::default());
    chain.push(Arc::new(FixedStrategy));

    let outcome = chain
        .solve(&ChallengePayload::image(png(150, 80)))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::solved("fixed", "OK"));
    assert_eq!(mock.calls().len(), 2);
}

/// Never succeeds; counts how often it was asked.
#[derive(Default)]
struct CountingStrategy {
    attempts: AtomicUsize,
}

#[async_trait]
impl Strategy for CountingStrategy {
    fn name(&self) -> &str {
        "counting"
    }

    async fn attempt(&self, _payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(RecognitionOutcome::failed("counting"))
    }
}

#[tokio::test]
async fn first_success_stops_the_chain() {
    let before = Arc::new(CountingStrategy::default());
    let after = Arc::new(CountingStrategy::default());
    let strategies: Vec<Arc<dyn Strategy>> =
        vec![before.clone(), Arc::new(FixedStrategy), after.clone()];
    let chain = StrategyChain::new(strategies);

    let outcome = chain
        .solve(&ChallengePayload::image(Vec::new()))
        .await
        .unwrap();

    assert_eq!(outcome, RecognitionOutcome::solved("fixed", "OK"));
    assert_eq!(before.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(after.attempts.load(Ordering::SeqCst), 0);
}
