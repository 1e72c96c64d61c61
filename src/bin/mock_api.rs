//! autohub-mock-api: in-memory AutoHub REST backend.
//!
//! Serves fixture records for every entity so the CLI can run with
//! `--remote` without the real backend.
//!
//! Usage:
//!   autohub-mock-api [--port 5000] [--token secret]
//!
//! Environment variables:
//!   AUTOHUB_MOCK_PORT  - Port to listen on (default: 5000)
//!   AUTOHUB_MOCK_TOKEN - Bearer token required on record routes (optional)

use anyhow::Result;
use autohub::logging;
use autohub::mock_api::{run, MockApiConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "autohub-mock-api", about = "In-memory AutoHub REST backend")]
struct Args {
    #[arg(long, env = "AUTOHUB_MOCK_PORT", default_value_t = 5000)]
    port: u16,

    #[arg(long, env = "AUTOHUB_MOCK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, help = "Debug logging")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(if args.debug { "debug" } else { "info" });

    run(MockApiConfig {
        port: args.port,
        token: args.token,
    })
    .await?;
    Ok(())
}
