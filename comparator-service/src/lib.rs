pub mod config;
pub mod http;
pub mod metrics_server;
pub mod observability;
pub mod seed;
pub mod validation;

pub use config::AppConfig;
