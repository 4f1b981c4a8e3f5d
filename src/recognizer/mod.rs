pub mod mock;
pub mod tesseract;

use async_trait::async_trait;

use crate::error::EngineError;

/// Characters the engine is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Digits and ASCII letters, for plain text challenges.
    Alphanumeric,
    /// Digits plus the operator glyphs drawn on math challenges.
    Arithmetic,
}

impl Charset {
    pub fn whitelist(self) -> &'static str {
        match self {
            Charset::Alphanumeric => {
                "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz"
            }
            Charset::Arithmetic => "0123456789+-=x*",
        }
    }
}

/// How the image bytes reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Written to a scoped temporary file that is removed afterwards.
    TempFile,
    /// Piped to the engine's stdin; nothing touches the filesystem.
    Stdin,
}

/// Raw optical text recognition over image bytes.
///
/// `Ok(None)` means the engine ran but produced nothing usable (empty output,
/// non-zero exit, timeout). `Err` is reserved for faults that prevent running
/// the engine at all. Implementations never retry.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(
        &self,
        image: &[u8],
        charset: Charset,
        delivery: Delivery,
    ) -> Result<Option<String>, EngineError>;
}
