use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{Charset, Delivery, Recognizer};
use crate::consts::{DEFAULT_ENGINE, DEFAULT_ENGINE_TIMEOUT, TEMP_FILE_PREFIX};
use crate::error::EngineError;

/// Maximum stderr kept for diagnostics. Anything beyond this is truncated.
const MAX_STDERR_BYTES: usize = 2_000;

/// Environment variables passed through to the engine. Everything else is
/// stripped.
const SAFE_ENV_VARS: &[&str] = &[
    "PATH",
    "HOME",
    "LANG",
    "LC_ALL",
    "TZ",
    "TESSDATA_PREFIX",
    "OMP_THREAD_LIMIT",
];

/// Configuration for the external engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Binary name (looked up on `PATH`) or absolute path.
    pub binary: PathBuf,
    /// A run exceeding this is killed and treated as "no text".
    pub timeout: Duration,
    /// Directory for scoped temporary image files.
    pub temp_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_ENGINE),
            timeout: DEFAULT_ENGINE_TIMEOUT,
            temp_dir: std::env::temp_dir(),
        }
    }
}

/// Runs a tesseract-compatible binary as a subprocess:
/// `<binary> <file|-> stdout -c tessedit_char_whitelist=<charset>`.
pub struct TesseractEngine {
    config: EngineConfig,
}

impl TesseractEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Write the image to a uniquely named file that is deleted when the
    /// returned handle drops.
    async fn write_temp(&self, image: &[u8]) -> Result<NamedTempFile, EngineError> {
        let file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(&self.config.temp_dir)
            .map_err(EngineError::TempFile)?;
        tokio::fs::write(file.path(), image)
            .await
            .map_err(EngineError::TempFile)?;
        Ok(file)
    }

    fn spawn_error(&self, source: io::Error) -> EngineError {
        let path = self.config.binary.clone();
        if source.kind() == io::ErrorKind::NotFound {
            EngineError::NotFound { path }
        } else {
            EngineError::Spawn { path, source }
        }
    }

    fn filtered_env() -> Vec<(String, String)> {
        SAFE_ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|val| (key.to_string(), val)))
            .collect()
    }

    fn truncate_output(output: &str, max_bytes: usize) -> &str {
        if output.len() <= max_bytes {
            return output;
        }
        let mut end = max_bytes;
        while !output.is_char_boundary(end) {
            end -= 1;
        }
        &output[..end]
    }

    /// Spawn the engine and collect its output. Stdin (if any) is written
    /// concurrently with reading stdout so neither pipe can stall the other.
    async fn run(
        &self,
        input: OsString,
        image: &[u8],
        charset: Charset,
        delivery: Delivery,
    ) -> Result<Output, EngineError> {
        let stdin = match delivery {
            Delivery::Stdin => Stdio::piped(),
            Delivery::TempFile => Stdio::null(),
        };

        let mut child = Command::new(&self.config.binary)
            .arg(input)
            .arg("stdout")
            .arg("-c")
            .arg(format!("tessedit_char_whitelist={}", charset.whitelist()))
            .env_clear()
            .envs(Self::filtered_env())
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let pipe = child.stdin.take();
        let feed = async move {
            let Some(mut pipe) = pipe else {
                return Ok(());
            };
            match pipe.write_all(image).await {
                // The engine may exit before reading everything, e.g. on a
                // corrupt image. Its exit status tells the story.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed.map_err(EngineError::Io)?;
        output.map_err(EngineError::Io)
    }
}

#[async_trait]
impl Recognizer for TesseractEngine {
    async fn recognize(
        &self,
        image: &[u8],
        charset: Charset,
        delivery: Delivery,
    ) -> Result<Option<String>, EngineError> {
        let temp = match delivery {
            Delivery::TempFile => Some(self.write_temp(image).await?),
            Delivery::Stdin => None,
        };
        let input = temp
            .as_ref()
            .map(|f| f.path().as_os_str().to_owned())
            .unwrap_or_else(|| OsString::from("-"));

        let result = tokio::time::timeout(
            self.config.timeout,
            self.run(input, image, charset, delivery),
        )
        .await;

        if let Some(temp) = temp {
            let path = temp.path().to_path_buf();
            if let Err(e) = temp.close() {
                warn!(path = %path.display(), error = %e, "failed to remove temporary image");
            }
        }

        let output = match result {
            Ok(output) => output?,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    ?charset,
                    "recognition engine timed out"
                );
                return Ok(None);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                code = output.status.code().unwrap_or(-1),
                stderr = Self::truncate_output(stderr.trim(), MAX_STDERR_BYTES),
                "recognition engine exited with failure"
            );
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            debug!(?charset, "recognition engine produced no text");
            return Ok(None);
        }
        Ok(Some(text))
    }
}
