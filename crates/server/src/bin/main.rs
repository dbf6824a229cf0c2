//! Binary entry point for the keygate API server.

use clap::Parser;
use keygate_server::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let config = Config::parse();
    if let Err(e) = keygate_server::serve(config).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
