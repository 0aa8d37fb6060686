pub mod logging;
pub mod service;

pub use logging::TracingService;
pub use service::MetricsService;
