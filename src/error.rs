//! Error taxonomy.
//!
//! Only infrastructure faults and malformed requests are errors. A challenge
//! that could not be read is an ordinary [`RecognitionOutcome`] with
//! `succeeded = false`.
//!
//! [`RecognitionOutcome`]: crate::strategy::RecognitionOutcome

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The engine could not be run at all. Distinct from "ran, found nothing".
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("recognition engine not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to start recognition engine {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write temporary image: {0}")]
    TempFile(#[source] io::Error),

    #[error("i/o error talking to recognition engine: {0}")]
    Io(#[source] io::Error),
}

/// The payload could not be decoded as an image.
#[derive(Debug, Error)]
#[error("cannot decode image: {0}")]
pub struct DecodeError(#[from] image::ImageError);

/// A fault that aborted the whole chain.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("{strategy} strategy: {source}")]
    Engine {
        strategy: String,
        #[source]
        source: EngineError,
    },
}

/// Rejected before any strategy ran. Always a client error.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("empty payload")]
    EmptyPayload,

    #[error("unsupported payload type: {0}")]
    UnsupportedKind(String),
}
