pub mod config;

pub use config::{load_config, prepare_data_dir, DEFAULT_CONFIG_PATHS};

pub use account_api as api;
pub use account_metrics as metrics;
pub use account_models as models;
pub use account_store as store;
