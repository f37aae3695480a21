mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use anyhow::Context;

use config::DashboardConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("reading configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    // No table, no server.
    let table = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    app::serve(AppState::new(table, config)).await
}
