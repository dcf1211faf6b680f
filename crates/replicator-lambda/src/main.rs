//! s3-replicator - event-triggered S3 object replication
//!
//! Copies one object per invocation from a source bucket to a destination
//! bucket and reports the outcome to an SNS topic and, optionally, a
//! Microsoft Teams channel.

mod context;
mod handler;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lambda_runtime::{service_fn, Diagnostic, LambdaEvent};
use replicator_core::config::{LogFormat, LoggingConfig};
use replicator_core::{ReplicatorConfig, VERSION};
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "s3-replicator")]
#[command(version = VERSION)]
#[command(about = "Event-triggered S3 object replication", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REPLICATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "REPLICATOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run under the Lambda runtime (default)
    Serve,

    /// Replicate a single object locally and print the response
    Invoke {
        /// Object key
        #[arg(long, conflicts_with = "event")]
        key: Option<String>,

        /// Source bucket (defaults to SOURCE_BUCKET)
        #[arg(long)]
        source_bucket: Option<String>,

        /// Destination bucket (defaults to DESTINATION_BUCKET)
        #[arg(long)]
        destination_bucket: Option<String>,

        /// Read the raw event payload from a JSON file
        #[arg(long)]
        event: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = ReplicatorConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_tracing(&config.logging);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Version => {
            println!("s3-replicator {}", VERSION);
        }
        Commands::Serve => {
            log_config_warnings(&config);
            serve(config).await?;
        }
        Commands::Invoke {
            key,
            source_bucket,
            destination_bucket,
            event,
        } => {
            log_config_warnings(&config);
            let event = match event {
                Some(path) => read_event(&path)?,
                None => event_from_args(key, source_bucket, destination_bucket),
            };
            invoke(config, event).await?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true))
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init(),
    }
}

fn log_config_warnings(config: &ReplicatorConfig) {
    for warning in config.warnings() {
        warn!("{}", warning);
    }
}

async fn serve(config: ReplicatorConfig) -> anyhow::Result<()> {
    info!(
        teams_enabled = config.webhook.enabled,
        "Starting s3-replicator {} under the Lambda runtime", VERSION
    );

    let handler = context::build_handler(config).await?;

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move {
            handler
                .handle(event.payload)
                .await
                .map_err(|err| Diagnostic {
                    error_type: err.kind().to_string(),
                    error_message: err.to_string(),
                })
        }
    });

    lambda_runtime::run(func)
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
}

async fn invoke(config: ReplicatorConfig, event: Value) -> anyhow::Result<()> {
    let handler = context::build_handler(config).await?;

    let response = handler
        .handle(event)
        .await
        .context("Replication failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_event(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {:?}", path))?;

    serde_json::from_str(&content).with_context(|| "Failed to parse event file")
}

fn event_from_args(
    key: Option<String>,
    source_bucket: Option<String>,
    destination_bucket: Option<String>,
) -> Value {
    let mut event = Map::new();
    for (name, value) in [
        ("key", key),
        ("source_bucket", source_bucket),
        ("destination_bucket", destination_bucket),
    ] {
        if let Some(value) = value {
            event.insert(name.to_string(), Value::String(value));
        }
    }
    Value::Object(event)
}
