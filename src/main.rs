//! Bankweb main entry point

use anyhow::Context;
use bankweb_api::start_server;
use bankweb_config::{Config, ConfigErrorSeverity};
use bankweb_core::HttpBankBackend;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "bankweb")]
#[command(author = "Bankweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Server-rendered admin profile editor and transaction history", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // Loaded before the logger so `logging.level` can act as the default filter
    let loaded = Config::load(&args.config);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    match loaded {
        Ok(_) => log::info!("Config loaded from {}", args.config.display()),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => {
            log::warn!("[{}] {}; using defaults. {}", e.code(), e, e.suggestion());
        }
        Err(e) => {
            log::error!("[{}] {}", e.code(), e);
            log::error!("{}", e.suggestion());
            return Err(e).with_context(|| format!("loading {}", args.config.display()));
        }
    }

    if let Some(port) = args.port {
        config.server.port = port;
        config.validate().context("invalid --port")?;
    }

    log::info!(
        "Backend: {} (timeout {}s)",
        config.backend.base_url,
        config.backend.timeout_secs
    );

    let backend = HttpBankBackend::from_config(&config).context("creating backend client")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(backend)))?;

    Ok(())
}
