pub mod factory;
pub mod helpers;
pub mod http_client;

pub use factory::*;
pub use helpers::*;
pub use http_client::*;
