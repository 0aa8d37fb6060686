use account_models::AccountError;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::{debug, instrument};

pub struct MetricsService {
    registry: Registry,
    accounts_created_total: IntCounter,
    accounts_updated_total: IntCounter,
    accounts_deleted_total: IntCounter,
    errors_total: IntCounterVec,
}

impl MetricsService {
    pub fn new() -> Result<Self, AccountError> {
        let registry = Registry::new();

        let accounts_created_total = IntCounter::new(
            "accounts_created_total",
            "Total number of accounts created",
        )
        .map_err(internal)?;

        let accounts_updated_total = IntCounter::new(
            "accounts_updated_total",
            "Total number of accounts updated",
        )
        .map_err(internal)?;

        let accounts_deleted_total = IntCounter::new(
            "accounts_deleted_total",
            "Total number of accounts deleted",
        )
        .map_err(internal)?;

        let errors_total = IntCounterVec::new(
            Opts::new(
                "account_api_errors_total",
                "Total number of error responses by HTTP status",
            ),
            &["status"],
        )
        .map_err(internal)?;

        registry
            .register(Box::new(accounts_created_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(accounts_updated_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(accounts_deleted_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(errors_total.clone()))
            .map_err(internal)?;

        Ok(Self {
            registry,
            accounts_created_total,
            accounts_updated_total,
            accounts_deleted_total,
            errors_total,
        })
    }

    #[instrument(skip(self))]
    pub fn record_account_created(&self, account_id: i64) {
        self.accounts_created_total.inc();
        debug!("Recorded account creation: {}", account_id);
    }

    #[instrument(skip(self))]
    pub fn record_account_updated(&self, account_id: i64) {
        self.accounts_updated_total.inc();
        debug!("Recorded account update: {}", account_id);
    }

    #[instrument(skip(self))]
    pub fn record_account_deleted(&self, account_id: i64) {
        self.accounts_deleted_total.inc();
        debug!("Recorded account deletion: {}", account_id);
    }

    #[instrument(skip(self))]
    pub fn record_error(&self, status: u16) {
        let status = status.to_string();
        self.errors_total
            .with_label_values(&[status.as_str()])
            .inc();
    }

    pub fn accounts_created(&self) -> u64 {
        self.accounts_created_total.get()
    }

    pub fn get_prometheus_metrics(&self) -> Result<String, AccountError> {
        let metric_families = self.registry.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();

        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(internal)?;

        String::from_utf8(buffer).map_err(internal)
    }
}

fn internal<E: std::fmt::Display>(e: E) -> AccountError {
    AccountError::InternalError {
        reason: e.to_string(),
    }
}
