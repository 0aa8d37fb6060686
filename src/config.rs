use account_models::{AccountError, Config};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Files probed, in order, when no explicit config path is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/default.toml"];

/// Top-level `Config` sections reachable through `ACCOUNT_<SECTION>__<KEY>`.
const ENV_SECTIONS: &[&str] = &["server", "data", "security", "logging"];

/// Layer defaults, the TOML file, `ACCOUNT_*` variables and the legacy
/// `DATABASE_URI` / `PORT` variables, later sources winning.
pub fn figment(path: Option<&Path>) -> Result<Figment, AccountError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(AccountError::ConfigError {
                    reason: format!("config file {} does not exist", path.display()),
                });
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(found) = DEFAULT_CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.exists())
            {
                figment = figment.merge(Toml::file(found));
            }
        }
    }

    // Other ACCOUNT_* variables (such as the CLI's ACCOUNT_ENDPOINT) are not config.
    figment = figment.merge(
        Env::prefixed("ACCOUNT_")
            .filter(|key| {
                let key = key.as_str().to_ascii_lowercase();
                ENV_SECTIONS
                    .iter()
                    .any(|section| key.starts_with(&format!("{section}__")))
            })
            .split("__"),
    );

    if let Ok(uri) = std::env::var("DATABASE_URI") {
        figment = figment.merge(("data.db_url", uri));
    }
    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port.parse().map_err(|_| AccountError::ConfigError {
            reason: format!("PORT must be a port number, got '{port}'"),
        })?;
        figment = figment.merge(("server.port", port));
    }

    Ok(figment)
}

pub fn load_config(path: Option<&Path>) -> Result<Config, AccountError> {
    figment(path)?
        .extract()
        .map_err(|e| AccountError::ConfigError {
            reason: e.to_string(),
        })
}

/// Create the parent directory of a file-backed SQLite database.
pub fn prepare_data_dir(db_url: &str) {
    let Some(db_path) = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
    else {
        return;
    };
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.is_empty() || db_path.starts_with(":memory:") {
        return;
    }
    if let Some(parent) = Path::new(db_path).parent() {
        if parent.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create DB parent directory {:?}: {}", parent, e);
        }
    }
}
