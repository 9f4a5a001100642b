use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG manda; si no está, info para nuestros crates
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("collector=info,common=info,reqwest=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    collector::cli::run().await
}
