//! provider-router - route a single prompt through the configured chain
//!
//! Loads configuration, builds a router and prints the response as JSON.
//! Remote adapters are supplied by embedding applications, so from the
//! command line only the built-in local provider can answer.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use provider_router::config::LogFormat;
use provider_router::utils::logging::init_logging;
use provider_router::{
    ChatMessage, ChatRequest, Config, ResponseFormat, Router, StaticConnectivity,
    TracingDecisionSink,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "provider-router", version, about = "Route a chat prompt across providers")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "ROUTER_CONFIG")]
    config: Option<PathBuf>,

    /// Response format requested from providers
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Stop after the first provider that fails
    #[arg(long)]
    strict: bool,

    /// Return a terminal error instead of falling back to the local provider
    #[arg(long)]
    no_fail_open: bool,

    /// Treat the network as unreachable
    #[arg(long)]
    offline: bool,

    /// Overall deadline for the request in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Prompt sent as a single user message
    prompt: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = Config::load(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    init_logging(&config.logging).context("failed to initialise logging")?;
    debug!(policy_id = %config.routing.policy_id, "Configuration loaded");

    let router = Router::builder_from_config(&config)
        .connectivity(Arc::new(StaticConnectivity::new(!cli.offline)))
        .sink(Arc::new(TracingDecisionSink))
        .build();

    let format = match cli.format {
        OutputFormat::Text => ResponseFormat::Text,
        OutputFormat::Json => ResponseFormat::Json,
    };
    let request = ChatRequest::builder()
        .message(ChatMessage::user(cli.prompt)?)
        .response_format(format)
        .build()?;

    let mut options = router.default_options();
    if cli.strict {
        options = options.with_strict_mode(true);
    }
    if cli.no_fail_open {
        options = options.with_fail_open(false);
    }
    if let Some(ms) = cli.timeout_ms {
        options = options.with_deadline(Duration::from_millis(ms));
    }

    let response = router.route(request, options).await;
    info!(provider = %response.provider, success = response.success, "Done");

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.success)
}
