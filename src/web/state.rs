//! Shared application state for the web server.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::dash::{build_callbacks, CallbackRegistry, Layout};
use crate::data::LaunchDataset;
use crate::web::handlers::render_dashboard;

/// Everything a request needs. Read-only once the server starts.
pub struct AppState {
    pub config: DashboardConfig,
    pub dataset: LaunchDataset,
    pub layout: Layout,
    pub callbacks: CallbackRegistry,
    /// The dashboard HTML; the layout never changes after startup.
    pub page: String,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset) -> Result<Self, minijinja::Error> {
        let layout = Layout::build(&dataset);
        let page = render_dashboard(&layout)?;
        Ok(Self {
            config,
            dataset,
            layout,
            callbacks: build_callbacks(),
            page,
        })
    }
}

pub type SharedState = Arc<AppState>;
