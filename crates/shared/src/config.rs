//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Costing engine configuration.
    #[serde(default)]
    pub costing: CostingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Costing engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CostingConfig {
    /// Decimal places kept on line and header margin percentages.
    #[serde(default = "default_percent_decimal_places")]
    pub percent_decimal_places: u32,
}

fn default_percent_decimal_places() -> u32 {
    2
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            percent_decimal_places: default_percent_decimal_places(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "bundlecost=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("BUNDLECOST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
