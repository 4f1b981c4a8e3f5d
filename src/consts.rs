//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine binary looked up on `PATH` when none is configured.
pub const DEFAULT_ENGINE: &str = "tesseract";

/// Where a trained recognition model would live.
pub const DEFAULT_MODEL_DIR: &str = "./models/";

/// Address the HTTP front end binds to by default.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Upper bound on a single engine invocation.
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest request body accepted by `/solve`: 10 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Arithmetic challenges are rendered as small strips: strictly narrower than
/// this many pixels...
pub const ARITHMETIC_MAX_WIDTH: u32 = 200;

/// ...and strictly shorter than this many.
pub const ARITHMETIC_MAX_HEIGHT: u32 = 100;

/// Prefix of temporary files handed to the engine.
pub const TEMP_FILE_PREFIX: &str = "challenge_";

/// Strategy name reported when every strategy failed.
pub const UNSOLVED_STRATEGY: &str = "none";

/// Format a byte count for humans (e.g. 10 MiB, 512 KiB, 300 B).
pub fn format_bytes(n: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;
    if n >= MIB && n.is_multiple_of(MIB) {
        format!("{} MiB", n / MIB)
    } else if n >= KIB && n.is_multiple_of(KIB) {
        format!("{} KiB", n / KIB)
    } else {
        format!("{} B", n)
    }
}
