//! Web server for the GitHub profile README generator.
//!
//! Serves a single-page UI and a JSON API that turns a GitHub profile URL
//! into a generated profile README.

use clap::Parser;
use profile_readme::{load_config, ConfigError, GenerateError, ReadmeGenerator};
use profile_readme_server::{router, AppState};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Profile README Server - Generate GitHub profile READMEs from public profile data.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "PROFILE_README_BIND", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Path to the config file. A missing file means defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// GitHub Personal Access Token (optional, raises the API rate limit).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// API key for the completion provider.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generator(#[from] GenerateError),

    #[error("Failed to serve on '{bind}': {source}")]
    Io {
        bind: String,
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), ServerError> {
    profile_readme::install_crypto_provider();

    let mut config = load_config(&args.config)?;
    if let Some(token) = args.github_token {
        config.github = config.github.with_token(token);
    }
    if let Some(api_key) = args.api_key {
        config.llm = config.llm.with_api_key(api_key);
    }
    let config = config.with_env_overrides();

    let generator = ReadmeGenerator::new(&config)?;
    if !generator.has_api_key() {
        warn!("No LLM API key configured; generate requests will fail until GROQ_API_KEY or OPENAI_API_KEY is set");
    }
    info!(model = %config.llm.model(), "Completion provider configured");

    let app = router(AppState::new(generator));
    let io_error = |source: std::io::Error| ServerError::Io {
        bind: args.bind.clone(),
        source,
    };
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .map_err(io_error)?;
    info!(address = %args.bind, "Server listening");

    axum::serve(listener, app).await.map_err(io_error)?;
    Ok(())
}
