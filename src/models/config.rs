//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Largest number of rows a single CSV export returns unless configured.
pub const DEFAULT_EXPORT_LIMIT: usize = 5000;

fn default_export_limit() -> usize {
    DEFAULT_EXPORT_LIMIT
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HS256 secret used to verify bearer tokens.
    pub secret: String,
    #[serde(default = "default_export_limit")]
    pub export_limit: usize,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/$APP_ENV.yaml`
    /// profile (defaults to `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
