pub mod arithmetic;
pub mod generic;
pub mod model;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::consts::UNSOLVED_STRATEGY;
use crate::error::{EngineError, RequestError};

/// Declared kind of a challenge payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    #[default]
    Image,
    Audio,
}

impl FromStr for PayloadKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "image" => Ok(PayloadKind::Image),
            "audio" => Ok(PayloadKind::Audio),
            _ => Err(RequestError::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Image => write!(f, "image"),
            PayloadKind::Audio => write!(f, "audio"),
        }
    }
}

/// Raw challenge bytes plus their declared kind. Owned by one request.
#[derive(Debug, Clone)]
pub struct ChallengePayload {
    kind: PayloadKind,
    bytes: Vec<u8>,
}

impl ChallengePayload {
    pub fn new(kind: PayloadKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }

    pub fn image(bytes: Vec<u8>) -> Self {
        Self::new(PayloadKind::Image, bytes)
    }

    pub fn audio(bytes: Vec<u8>) -> Self {
        Self::new(PayloadKind::Audio, bytes)
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Result of one strategy attempt, and of the chain as a whole.
/// `text` is empty whenever `succeeded` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    #[serde(rename = "success")]
    pub succeeded: bool,
    pub text: String,
    #[serde(rename = "method")]
    pub strategy: String,
}

impl RecognitionOutcome {
    pub fn solved(strategy: &str, text: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            text: text.into(),
            strategy: strategy.to_string(),
        }
    }

    pub fn failed(strategy: &str) -> Self {
        Self {
            succeeded: false,
            text: String::new(),
            strategy: strategy.to_string(),
        }
    }

    /// Every strategy was tried and none succeeded.
    pub fn unsolved() -> Self {
        Self::failed(UNSOLVED_STRATEGY)
    }
}

/// One self-contained recognition technique.
///
/// A strategy that cannot read the challenge returns a failed outcome. `Err`
/// means the infrastructure underneath is broken and aborts the chain.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;
    async fn attempt(&self, payload: &ChallengePayload) -> Result<RecognitionOutcome, EngineError>;
}
