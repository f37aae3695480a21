use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::model::IncidentTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared by every request. The table is loaded once and only ever read, so
/// handlers clone the `Arc`s and never lock.
#[derive(Debug, Clone)]
pub struct AppState {
    pub table: Arc<IncidentTable>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(table: IncidentTable, config: DashboardConfig) -> Self {
        Self {
            table: Arc::new(table),
            config: Arc::new(config),
        }
    }
}
