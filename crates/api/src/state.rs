use account_metrics::MetricsService;
use account_models::Config;
use account_store::AccountStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<AccountStore>,
    pub metrics: Arc<MetricsService>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<AccountStore>, metrics: Arc<MetricsService>) -> Self {
        Self {
            config,
            store,
            metrics,
        }
    }
}
