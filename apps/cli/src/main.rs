mod app;
mod commands;
mod config;
mod main_lib;
mod render;

use config::Config;
use main_lib::{build_view_model, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();

    let view_model = build_view_model(&config)?;
    tracing::info!(
        "Watching {} assets in {} from {}",
        config.per_page,
        config.vs_currency,
        config.api_url
    );

    app::run(view_model, config.refresh_interval).await
}
