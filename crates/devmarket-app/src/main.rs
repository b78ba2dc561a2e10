use tracing::info;

use devmarket_app::shell::Shell;
use devmarket_client::{ApiClient, ClientConfig, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devmarket=debug".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    info!("DevMarket client starting against {}", config.api_base);

    let api = ApiClient::new(config.api_base.clone())?;
    let session = Session::resolve(&api).await;

    Shell::new(api, config, session).run().await
}
