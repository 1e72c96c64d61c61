use anyhow::{Context as _, Result};
use autohub::cli::{self, Context};
use autohub::config::Config;
use autohub::{logging, Args};
use clap::Parser;

fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(if args.debug { "debug" } else { "info" });

    let cfg = Config::load(args.config.as_deref()).context("Config load failed")?;
    let problems = cfg.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("config: {}", problem);
        }
        anyhow::bail!("invalid configuration ({} problems)", problems.len());
    }

    let ctx = Context::new(cfg);
    cli::run(&ctx, args.command)?;
    Ok(())
}
