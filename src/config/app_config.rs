use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engines: EnginesConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for request bodies, uploads included
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the remote perception engines live
#[derive(Debug, Clone, Deserialize)]
pub struct EnginesConfig {
    #[serde(default = "default_engines_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Outbound request timeout; unset means wait for the engine indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Per-capability base URL overrides, keyed by capability name
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

/// Cross-site request protection
///
/// Disabled by default: every endpoint is exempt, matching clients that post
/// from arbitrary origins.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    #[serde(default)]
    pub csrf_protection: bool,
    #[serde(default)]
    pub trusted_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_engines_base_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EnginesConfig {
    fn default() -> Self {
        Self {
            base_url: default_engines_base_url(),
            api_key: None,
            timeout_secs: None,
            endpoints: HashMap::new(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
        }
    }
}

/// Paths already served by the API router
const RESERVED_PATHS: [&str; 4] = ["/health", "/ready", "/live", "/atoms"];

impl MetricsConfig {
    /// Reject a metrics path the router could not mount
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let path = self.path.as_str();

        if !path.starts_with('/') || path.contains(['{', '}', '*', '?', '#']) {
            return Err(config::ConfigError::Message(format!(
                "metrics.path must be a literal path starting with '/', got '{}'",
                path
            )));
        }

        let collides = RESERVED_PATHS.iter().any(|reserved| {
            path == *reserved
                || path
                    .strip_prefix(reserved)
                    .is_some_and(|rest| rest.starts_with('/'))
        });

        if collides {
            return Err(config::ConfigError::Message(format!(
                "metrics.path '{}' collides with an API route",
                path
            )));
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.trusted_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.metrics.validate()?;

        Ok(config)
    }
}
