use std::sync::Arc;

use anyhow::{Context, Result};
use blog_content::{ContentService, StrapiClient};
use tracing::info;

mod infrastructure;
mod presentation;
mod server;

use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let client = StrapiClient::new(&settings.content).context("failed to build content client")?;
    info!(
        api_url = %settings.content.api_url,
        authenticated = settings.content.api_token.is_some(),
        cache_ttl_secs = settings.content.cache_ttl.as_secs(),
        "content client ready"
    );

    let state = AppState::new(Arc::new(ContentService::new(client)));
    server::run_http(&settings, state).await
}
