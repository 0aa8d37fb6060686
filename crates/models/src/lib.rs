pub mod account;
pub mod config;
pub mod error;
pub mod service;

pub use account::*;
pub use config::*;
pub use error::*;
pub use service::*;
