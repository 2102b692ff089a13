//! Dashboard settings. Fixed at startup; nothing is read from flags or the
//! environment.

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Launch records CSV, relative to the working directory.
    pub dataset_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Rendered chart size in pixels.
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            chart_width: 900,
            chart_height: 450,
        }
    }
}
