//! Storefront - Main Application Entry Point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ConfigLoader;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

use app::Application;

/// Storefront cart viewer
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Dotenv file to read configuration from; the process environment wins
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Prefix of every configuration variable, e.g. REACT_APP_
    #[arg(long, default_value = "")]
    prefix: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch and print the cart (default)
    Cart,
    /// Print the assembled configuration as JSON
    Config,
    /// Write a dotenv template listing every variable
    Example {
        #[arg(long, default_value = ".env.example")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv_result = load_implicit_dotenv(cli.env_file.as_deref());

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Some(Ok(path)) => info!("Loaded environment variables from {}", path.display()),
        // Only warn if the error is not "file not found"
        Some(Err(e)) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Some(Err(_)) => {}
        None => info!("Explicit env file given, skipping implicit .env"),
    }

    let loader = ConfigLoader::with_prefix(cli.prefix.clone());

    let command = cli.command.unwrap_or(Command::Cart);
    if let Command::Example { output } = &command {
        loader
            .create_example(output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Example environment written to {}", output.display());
        return Ok(());
    }

    info!("Starting storefront v{}", env!("CARGO_PKG_VERSION"));

    // Invalid configuration stops startup
    let config = loader
        .load(cli.env_file.as_deref())
        .context("Failed to load configuration")?;

    let app = Application::new(config).context("Failed to create application")?;

    let mut stdout = std::io::stdout().lock();
    match command {
        Command::Config => app.print_config(&mut stdout)?,
        _ => {
            app.log_startup();
            app.run_cart(&mut stdout).await?;
        }
    }

    info!(base_url = %app.config().api.base_url, "Storefront finished");
    Ok(())
}

/// Copy `./.env` into the process environment unless an explicit env file
/// was named; process values outrank `--env-file`.
fn load_implicit_dotenv(env_file: Option<&Path>) -> Option<dotenvy::Result<PathBuf>> {
    if env_file.is_some() {
        return None;
    }
    Some(dotenvy::dotenv())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr, stdout carries the cart view
    match log_format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!(level = %log_level, format = %log_format, "Storefront logging ready");

    Ok(())
}
