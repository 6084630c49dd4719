//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, EnginesConfig, LogFormat, LoggingConfig, MetricsConfig, SecurityConfig,
    ServerConfig,
};
