mod basic;
mod payments;
mod retry;

pub use basic::BasicConfig;
pub use payments::PaymentsConfig;
pub use retry::RetryConfig;

use crate::error::ConfigError;
use crate::payments::normalize_currency;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Payment processor settings (see `payments` table in config.toml).
    #[serde(default)]
    pub payments: PaymentsConfig,

    /// Backoff applied to payment processor calls (see `retry` table in config.toml).
    #[serde(default)]
    pub retry: RetryConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "STOREFRONT_";
const SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";

impl Config {
    /// Builds a Figment that merges, in increasing priority: defaults, `config.toml` (if
    /// present), `STOREFRONT_*` variables (`__` separates nested keys) and `STRIPE_SECRET_KEY`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[SECRET_KEY_ENV])
                    .map(|_| "payments.secret_key".into()),
            )
    }

    /// Loads and validates configuration. A missing secret key is fatal.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg: Self = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payments.secret_key.trim().is_empty() {
            return Err(ConfigError::MissingSecretKey);
        }
        if normalize_currency(&self.payments.default_currency).is_none() {
            return Err(ConfigError::InvalidCurrency(
                self.payments.default_currency.clone(),
            ));
        }
        self.retry.to_options::<()>().validate()?;
        Ok(())
    }
}
