use account_models::{Account, AccountError, LogFormat, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub struct TracingService;

impl TracingService {
    /// Install the global subscriber. `RUST_LOG` wins over the configured level.
    pub fn init(config: &LoggingConfig) -> Result<(), AccountError> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .map_err(|e| AccountError::ConfigError {
                reason: format!("invalid log level '{}': {}", config.level, e),
            })?;

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = match config.format {
            LogFormat::Json => builder
                .json()
                .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
                .try_init(),
            LogFormat::Pretty => builder.try_init(),
        };

        result.map_err(|e| AccountError::ConfigError {
            reason: e.to_string(),
        })
    }

    pub fn log_account_created(account: &Account) {
        info!(
            account_id = account.id,
            name = %account.name,
            date_joined = %account.date_joined,
            "Account created"
        );
    }

    pub fn log_account_updated(account: &Account) {
        info!(
            account_id = account.id,
            name = %account.name,
            "Account updated"
        );
    }

    pub fn log_account_deleted(account_id: i64, existed: bool) {
        info!(account_id = account_id, existed = existed, "Account deleted");
    }

    pub fn log_rejected_request(path: &str, status: u16, message: &str) {
        warn!(
            path = %path,
            status = status,
            message = %message,
            "Request rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        // An unparsable directive only surfaces when RUST_LOG is unset.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "account=verbose".to_string(),
            format: LogFormat::Pretty,
        };
        assert!(matches!(
            TracingService::init(&config),
            Err(AccountError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_log_helpers_without_subscriber() {
        let account = Account {
            id: 1,
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            address: "1 Navy Yard".to_string(),
            phone_number: None,
            date_joined: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        TracingService::log_account_created(&account);
        TracingService::log_account_updated(&account);
        TracingService::log_account_deleted(account.id, true);
        TracingService::log_rejected_request("/accounts", 415, "Content-Type must be application/json");
    }
}
