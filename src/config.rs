//! Configuration
//!
//! Command line arguments with environment variable fallbacks. A `.env` file
//! in the working directory is read first if present.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::products::ProductId;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Where analytics events go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AnalyticsMode {
    /// Events are not reported.
    Off,

    /// Events are logged through `tracing`.
    Log,

    /// Events are written to stderr as JSON lines.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trolley configuration
#[derive(Debug, Parser)]
#[command(name = "trolley", version, about = "Shopping cart demo", long_about = None)]
pub struct Config {
    /// Directory holding the persisted cart.
    #[arg(long, env = "TROLLEY_STORE_DIR", default_value = ".trolley")]
    pub store_dir: PathBuf,

    /// YAML catalog fixture; the demo catalog is used when omitted.
    #[arg(long, env = "TROLLEY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Analytics event output.
    #[arg(long, env = "TROLLEY_ANALYTICS", value_enum, default_value_t = AnalyticsMode::Off)]
    pub analytics: AnalyticsMode,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do; an interactive session when omitted.
    #[command(subcommand)]
    pub action: Option<Action>,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// One-shot actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// List the catalog.
    Products,

    /// Show the cart.
    Cart,

    /// Add one unit of a product.
    Add {
        /// Product id
        id: ProductId,
    },

    /// Set the quantity of a product in the cart; 0 or less removes it.
    Update {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a product from the cart.
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Check out the cart.
    Checkout,

    /// Start an interactive session.
    Shell,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_interactive_session_with_demo_catalog() -> TestResult {
        let config = Config::try_parse_from(["trolley"])?;

        assert_eq!(config.action, None);
        assert_eq!(config.catalog, None);
        assert_eq!(config.analytics, AnalyticsMode::Off);

        Ok(())
    }

    #[test]
    fn parses_update_with_negative_quantity() -> TestResult {
        let config = Config::try_parse_from(["trolley", "update", "3", "-1"])?;

        assert_eq!(
            config.action,
            Some(Action::Update {
                id: ProductId::new(3),
                quantity: -1,
            })
        );

        Ok(())
    }

    #[test]
    fn parses_global_options() -> TestResult {
        let config = Config::try_parse_from([
            "trolley",
            "--store-dir",
            "/tmp/carts",
            "--analytics",
            "json",
            "--log-format",
            "json",
            "add",
            "1",
        ])?;

        assert_eq!(config.store_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.analytics, AnalyticsMode::Json);
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.action, Some(Action::Add { id: ProductId::new(1) }));

        Ok(())
    }

    #[test]
    fn rejects_non_numeric_product_ids() {
        assert!(Config::try_parse_from(["trolley", "add", "laptop"]).is_err());
    }
}
