use std::sync::Arc;

use anyhow::Result;
use filmmuse::api;
use filmmuse::catalog::Catalog;
use filmmuse::config::AppConfig;
use filmmuse::lookup::{LookupClient, OmdbProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .pretty()
        .init();

    let config = AppConfig::from_env()?;
    info!(
        dataset = %config.dataset_path.display(),
        bind_addr = %config.bind_addr,
        "loaded configuration"
    );

    let catalog = Catalog::load(&config.dataset_path).await?;
    info!(
        movie_count = catalog.len(),
        genre_count = catalog.genre_count(),
        "catalog ready"
    );

    let provider = OmdbProvider::new(config.omdb_api_key.clone())?;
    let lookup = LookupClient::new(Arc::new(provider));

    let app_state = api::AppState::new(catalog, lookup);
    let app = api::router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "starting http server");
    axum::serve(listener, app).await?;

    Ok(())
}
