use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{RouteTemplates, StatusPolicy};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub routes: RouteTemplates,
    pub logging: LoggingConfig,
}

/// Settings handed to the HTTP collaborator at construction
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base locator every step locator is resolved against
    pub base_url: String,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    /// Per-request timeout in milliseconds (0 = no limit)
    pub timeout_ms: u64,
    /// Which status codes count as success
    pub status_policy: StatusPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            headers: HashMap::from([("accept".to_string(), "application/json".to_string())]),
            timeout_ms: 10_000,
            status_policy: StatusPolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
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
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
