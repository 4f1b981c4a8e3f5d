//! Runtime configuration.
//!
//! Built once at start-up (see `main.rs`) and passed down explicitly. Library
//! code never reads the environment for settings.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::classifier::Classifier;
use crate::consts::{DEFAULT_BIND, DEFAULT_MAX_BODY_BYTES, DEFAULT_MODEL_DIR};
use crate::evaluator::OperatorSet;
use crate::recognizer::tesseract::EngineConfig;

/// Everything the strategy chains need.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub engine: EngineConfig,
    pub model_dir: PathBuf,
    pub classifier: Classifier,
    pub operators: OperatorSet,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            classifier: Classifier::default(),
            operators: OperatorSet::default(),
        }
    }
}

/// HTTP front end settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().expect("DEFAULT_BIND is a valid socket address"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn solver_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.engine.binary, PathBuf::from("tesseract"));
        assert_eq!(config.engine.timeout, Duration::from_secs(5));
        assert_eq!(config.model_dir, PathBuf::from("./models/"));
        assert_eq!(config.classifier.max_width, 200);
        assert_eq!(config.classifier.max_height, 100);
        assert_eq!(config.operators, OperatorSet::Add);
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }
}
