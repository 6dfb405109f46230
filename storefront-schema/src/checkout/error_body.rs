use serde::{Deserialize, Serialize};

/// Checkout API error envelope.
///
/// Validation failures carry a plain string (`{"error":"..."}`), while upstream failures carry an
/// object (`{"error":{"message":"..."}}`), which is what the checkout form already renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiErrorMessage {
    Plain(String),
    Detailed { message: String },
}

impl ApiErrorBody {
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorMessage::Plain(message.into()),
        }
    }

    pub fn detailed(message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorMessage::Detailed {
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        match &self.error {
            ApiErrorMessage::Plain(message) | ApiErrorMessage::Detailed { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_shapes_serialize_and_parse_back() {
        let plain = ApiErrorBody::plain("Invalid amount");
        let json = serde_json::to_string(&plain).expect("serialize");
        assert_eq!(json, r#"{"error":"Invalid amount"}"#);

        let detailed = ApiErrorBody::detailed("card_declined");
        let json = serde_json::to_string(&detailed).expect("serialize");
        assert_eq!(json, r#"{"error":{"message":"card_declined"}}"#);

        let parsed: ApiErrorBody = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.message(), "card_declined");
    }
}
