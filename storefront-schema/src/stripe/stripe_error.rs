use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Upstream error envelope: `{ "error": { "type": "...", "code": "...", "message": "..." } }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorBody {
    #[serde(rename = "error")]
    pub inner: StripeErrorObject,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeErrorObject {
    /// e.g. `card_error`, `invalid_request_error`, `api_error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl StripeErrorBody {
    /// Best human-readable description, falling back from `message` to `code` to `type`.
    pub fn describe(&self) -> String {
        self.inner
            .message
            .clone()
            .or_else(|| self.inner.code.clone())
            .or_else(|| self.inner.r#type.clone())
            .unwrap_or_else(|| "Upstream error (check server logs for details).".to_string())
    }
}
