use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use tessera::banner::{BannerInfo, print_banner};
use tessera::chain::Solver;
use tessera::classifier::Classifier;
use tessera::config::{ServerConfig, SolverConfig};
use tessera::consts::{
    ARITHMETIC_MAX_HEIGHT, ARITHMETIC_MAX_WIDTH, DEFAULT_BIND, DEFAULT_ENGINE,
    DEFAULT_MAX_BODY_BYTES, DEFAULT_MODEL_DIR,
};
use tessera::evaluator::OperatorSet;
use tessera::logging::{self, LogFormat};
use tessera::recognizer::tesseract::EngineConfig;
use tessera::server;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Operators {
    /// Addition only
    Add,
    /// Addition, subtraction and multiplication
    All,
}

#[derive(Parser)]
#[command(name = "tessera", version, about = "Reads text and arithmetic challenges.")]
struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "TESSERA_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Recognition engine binary (name on PATH or absolute path)
    #[arg(short, long, env = "TESSERA_ENGINE", default_value = DEFAULT_ENGINE)]
    engine: PathBuf,

    /// Engine timeout in seconds
    #[arg(
        short,
        long,
        env = "TESSERA_TIMEOUT",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Directory for temporary image files (default: system temp dir)
    #[arg(long, env = "TESSERA_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Directory holding a trained recognition model
    #[arg(long, env = "TESSERA_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    /// Operators the arithmetic strategy evaluates
    #[arg(long, value_enum, env = "TESSERA_OPERATORS", default_value_t = Operators::Add)]
    operators: Operators,

    /// Images narrower than this may be arithmetic challenges
    #[arg(long, default_value_t = ARITHMETIC_MAX_WIDTH)]
    math_max_width: u32,

    /// Images shorter than this may be arithmetic challenges
    #[arg(long, default_value_t = ARITHMETIC_MAX_HEIGHT)]
    math_max_height: u32,

    /// Largest accepted request body in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Cli {
    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            engine: EngineConfig {
                binary: self.engine.clone(),
                timeout: Duration::from_secs(self.timeout),
                temp_dir: self.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
            },
            model_dir: self.model_dir.clone(),
            classifier: Classifier {
                max_width: self.math_max_width,
                max_height: self.math_max_height,
            },
            operators: match self.operators {
                Operators::Add => OperatorSet::Add,
                Operators::All => OperatorSet::All,
            },
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init(&cli.log_level, format);

    let solver_config = cli.solver_config();
    let server_config = cli.server_config();

    let operators_label = match solver_config.operators {
        OperatorSet::Add => "+",
        OperatorSet::All => "+ - *",
    };

    print_banner(&BannerInfo {
        bind: server_config.bind,
        engine: &solver_config.engine.binary,
        timeout: solver_config.engine.timeout,
        temp_dir: &solver_config.engine.temp_dir,
        model_dir: &solver_config.model_dir,
        operators: operators_label,
        max_body_bytes: server_config.max_body_bytes,
    });

    let solver = Arc::new(Solver::from_config(&solver_config));
    server::run(&server_config, solver).await
}
