//! Launch Dash - SpaceX Launch Records Dashboard
//!
//! Serves the dashboard on http://127.0.0.1:8050.

use anyhow::Context;
use launch_dash::config::DashboardConfig;
use launch_dash::data::LaunchDataset;
use launch_dash::web::{build_router, AppState};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = DashboardConfig::default();

    // No dataset, no dashboard
    let dataset = match LaunchDataset::load(&config.dataset_path) {
        Ok(ds) => ds,
        Err(e) => {
            error!(path = %config.dataset_path.display(), error = %e, "Cannot start");
            return Err(e).context("loading launch records");
        }
    };

    let addr = config.bind_addr;
    let state = AppState::new(config, dataset).context("rendering dashboard page")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Dash is running on http://{}/", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
