use clap::Parser;
use distributed_cache::cli::Cli;
use distributed_cache::server;

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Cli::parse().into_config()?;

    tracing::info!(
        "Starting node {} of {} (client {})",
        config.local,
        config.registry.len(),
        config.client_addr
    );
    for (id, addr) in config.registry.iter() {
        tracing::info!("  - node {} peer endpoint {}", id, addr);
    }

    server::run(config).await
}
