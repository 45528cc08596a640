//! Histopathology prediction relay entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use histo_relay::api::{create_router, AppState, ErrorResponse, PredictResponse};
use histo_relay::config::Config;
use histo_relay::inference::HuggingFaceClient;
use histo_relay::metrics;
use histo_relay::relay::Relay;
use histo_relay::utils::shutdown_signal;
use histo_relay::RelayError;

/// Breast cancer histopathology prediction relay.
#[derive(Parser, Debug)]
#[command(name = "histo-relay")]
#[command(about = "Relays histopathology images to a hosted classifier")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web front and prediction API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Classify one image file and print the JSON response.
    Predict {
        /// Path to the image.
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("histo_relay=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Predict { image }) => cmd_predict(&image).await,
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration.
fn load_config() -> Result<Config, RelayError> {
    let config = Config::load()?;
    config.validate().map_err(RelayError::InvalidConfig)?;
    Ok(config)
}

/// Build the relay from configuration.
fn build_relay(config: &Config) -> Result<Relay, RelayError> {
    let client = HuggingFaceClient::from_config(config)?;
    Ok(Relay::new(Arc::new(client)))
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HISTO RELAY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Inference URL: {}", config.inference_url);
    println!("  Token: {}", config.redacted_token());
    println!("  Timeout: {}s", config.inference_timeout_secs);
    println!("  Listen: {}", config.bind_addr());
    println!("  Upload Limit: {} bytes", config.max_upload_bytes);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Classify a single image from disk.
async fn cmd_predict(image: &Path) -> anyhow::Result<()> {
    let config = load_config()?;
    let relay = build_relay(&config)?;

    let bytes = tokio::fs::read(image).await.map_err(RelayError::from)?;
    info!("Classifying {} ({} bytes)", image.display(), bytes.len());

    match relay.predict(Bytes::from(bytes)).await {
        Ok(result) => {
            let response = PredictResponse::from(result);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&e))?);
            Err(RelayError::from(e).into())
        }
    }
}

/// Serve the web front and prediction API.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Inference URL: {}", config.inference_url);
    info!("Inference timeout: {}s", config.inference_timeout_secs);

    let relay = build_relay(&config)?;
    let mut app_state = AppState::new(relay);

    match metrics::install_recorder() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);

    let router = create_router(app_state, config.max_upload_bytes);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
