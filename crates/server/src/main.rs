//! onthisday - MCP server entry point.
//!
//! Registers the historical_events tool and serves it over HTTP+SSE.

mod config;
mod error;
mod tool;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use mcp::McpServer;
use runtime::HuggingFaceBackend;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use error::Result;
use tool::HistoricalEventsTool;

const CONFIG_FILE: &str = "onthisday.toml";
const SERVER_NAME: &str = "onthisday";

#[derive(Parser)]
#[command(name = "onthisday")]
#[command(about = "MCP server answering what happened on a given date", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Bind address override (host:port).
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,mcp=info,runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // The token comes from the environment only; it never lives in the
    // config file or in source.
    let token = Config::token()?;
    let model =
        std::env::var("ONTHISDAY_MODEL").unwrap_or_else(|_| config.backend.model.clone());

    let mut builder = HuggingFaceBackend::builder(token, &model);
    if let Some(endpoint) = &config.backend.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let backend = builder.build();
    info!(%model, backend = %backend, "backend configured");

    let server = McpServer::new(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .with_tool(HistoricalEventsTool::new(backend));

    let addr = match cli.bind {
        Some(addr) => addr,
        None => config.bind_addr()?,
    };

    mcp::sse::serve(server, addr).await?;
    Ok(())
}
