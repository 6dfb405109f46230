//! Checkout API payloads for `POST /api/create-payment-intent`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound checkout request.
///
/// `amount` is kept as a raw JSON value so the server can tell a missing amount apart from a
/// non-numeric one and report both as validation errors instead of generic parse failures.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in major units (dollars for USD).
    #[serde(default)]
    pub amount: Option<Value>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl CreatePaymentIntentRequest {
    /// Numeric view of `amount`.
    ///
    /// JSON numbers are taken as-is; strings are accepted when they parse as a number, matching
    /// what browser forms commonly submit. Anything else yields `None`.
    pub fn amount_major(&self) -> Option<f64> {
        match self.amount.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_major_accepts_numbers_and_numeric_strings() {
        let req: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{"amount":10.5}"#).expect("valid json");
        assert_eq!(req.amount_major(), Some(10.5));
        assert!(req.currency.is_none());

        let req: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{"amount":" 42 ","currency":"eur"}"#).expect("valid json");
        assert_eq!(req.amount_major(), Some(42.0));
        assert_eq!(req.currency.as_deref(), Some("eur"));
    }

    #[test]
    fn amount_major_rejects_non_numeric_shapes() {
        for raw in [
            r#"{"amount":"abc"}"#,
            r#"{"amount":null}"#,
            r#"{"amount":true}"#,
            r#"{"amount":[1]}"#,
            r#"{}"#,
        ] {
            let req: CreatePaymentIntentRequest = serde_json::from_str(raw).expect("valid json");
            assert_eq!(req.amount_major(), None, "input: {raw}");
        }
    }

    #[test]
    fn response_uses_camel_case_client_secret() {
        let resp = CreatePaymentIntentResponse {
            client_secret: "pi_1_secret_2".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&resp).expect("serialize"),
            r#"{"clientSecret":"pi_1_secret_2"}"#
        );
    }
}
