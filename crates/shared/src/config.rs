//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Journal entry validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Approval threshold settings.
    #[serde(default)]
    pub approval: ApprovalConfig,
}

/// Journal entry validation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Maximum tolerated difference between debit and credit totals, in FCFA.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01 FCFA
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

/// Approval threshold settings.
///
/// An approval level is required when the entry amount strictly exceeds
/// its limit. The final level has no limit and is never triggered.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalConfig {
    /// Amount above which level 1 approval is required, in FCFA.
    #[serde(default = "default_level_1_limit")]
    pub level_1_limit: Decimal,
    /// Amount above which level 2 approval is required, in FCFA.
    #[serde(default = "default_level_2_limit")]
    pub level_2_limit: Decimal,
}

fn default_level_1_limit() -> Decimal {
    Decimal::from(100_000)
}

fn default_level_2_limit() -> Decimal {
    Decimal::from(1_000_000)
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            level_1_limit: default_level_1_limit(),
            level_2_limit: default_level_2_limit(),
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
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BALAFON").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
