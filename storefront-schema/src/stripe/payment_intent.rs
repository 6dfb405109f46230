use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Subset of the upstream PaymentIntent object that the checkout flow relies on.
///
/// Unknown fields are preserved in `extra` so debug logging still shows the full upstream
/// object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    pub id: String,

    /// Absent when the key used lacks permission to read it.
    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Minor units.
    #[serde(default)]
    pub amount: i64,

    #[serde(default)]
    pub currency: String,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub livemode: bool,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}
