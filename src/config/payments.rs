use serde::{Deserialize, Serialize};
use url::Url;

/// Payment processor configuration managed by Figment.
#[derive(Clone, Deserialize, Serialize)]
pub struct PaymentsConfig {
    /// Base URL of the processor's REST API; `v1/payment_intents` is resolved against it.
    /// TOML: `payments.api_base`. Default: `https://api.stripe.com/`.
    #[serde(default = "default_api_base")]
    pub api_base: Url,

    /// Secret API key. Normally supplied through the `STRIPE_SECRET_KEY` environment variable.
    /// TOML: `payments.secret_key`. Required, no default.
    #[serde(default)]
    pub secret_key: String,

    /// Currency used when the checkout request omits one.
    /// TOML: `payments.default_currency`. Default: `usd`.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Optional upstream HTTP proxy. If set, used for the reqwest client.
    /// TOML: `payments.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TOML: `payments.connect_timeout_secs`. Default: `10`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Per-attempt request timeout.
    /// TOML: `payments.request_timeout_secs`. Default: `30`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl PaymentsConfig {
    /// Secret key with everything but the mode prefix and last four characters masked.
    pub fn redacted_secret_key(&self) -> String {
        let key = self.secret_key.trim();
        if key.len() <= 12 {
            return "<redacted>".to_string();
        }
        let prefix = key.get(..8).unwrap_or_default();
        let suffix = key.get(key.len() - 4..).unwrap_or_default();
        format!("{prefix}…{suffix}")
    }
}

impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("api_base", &self.api_base.as_str())
            .field("secret_key", &self.redacted_secret_key())
            .field("default_currency", &self.default_currency)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            // No default. `Config::validate()` enforces non-empty.
            secret_key: String::new(),
            default_currency: default_currency(),
            proxy: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base() -> Url {
    Url::parse("https://api.stripe.com/").expect("default api base is a valid url")
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}
