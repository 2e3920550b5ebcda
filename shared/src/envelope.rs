//! The `{success, data, error}` wrapper every backend response uses.
//!
//! Shapes are validated here, once, instead of at each call site. A body
//! without a boolean `success` is malformed. Reads additionally require
//! `data`; mutations answer with `{success, message, <entity>_id}` and are
//! read through [`Envelope::into_ack`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Anything else the backend attached (`product_id`, `purchase_id`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("{0}")]
    Rejected(String),
}

/// What a successful create/update/delete tells us
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationAck {
    pub message: Option<String>,
    /// Id of the created entity, when the backend reports one
    pub id: Option<i64>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            extra: Map::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            extra: Map::new(),
        }
    }

    /// Parse a response body, rejecting anything that is not an envelope
    pub fn parse(body: &str) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| EnvelopeError::Malformed(format!("body is not JSON: {}", e)))?;

        match value.get("success") {
            Some(Value::Bool(_)) => {}
            Some(_) => return Err(EnvelopeError::Malformed("`success` is not a boolean".into())),
            None => return Err(EnvelopeError::Malformed("missing `success` field".into())),
        }

        serde_json::from_value(value).map_err(|e| EnvelopeError::Malformed(e.to_string()))
    }

    /// Best-effort human message from an error body; `None` when the body
    /// carries nothing useful
    pub fn error_text(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .filter(|s| !s.trim().is_empty())
    }

    fn rejection(&self) -> EnvelopeError {
        let text = self
            .error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "The server reported a failure".to_string());
        EnvelopeError::Rejected(text)
    }

    /// Typed payload of a successful read
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(self.rejection());
        }
        match self.data {
            None | Some(Value::Null) => Err(EnvelopeError::Malformed("missing `data` field".into())),
            Some(data) => {
                serde_json::from_value(data).map_err(|e| EnvelopeError::Malformed(e.to_string()))
            }
        }
    }

    /// Acknowledgement of a successful mutation
    pub fn into_ack(self) -> Result<MutationAck, EnvelopeError> {
        if !self.success {
            return Err(self.rejection());
        }
        let id = self
            .extra
            .iter()
            .find(|(key, _)| key.ends_with("_id"))
            .and_then(|(_, value)| value.as_i64());
        Ok(MutationAck {
            message: self.message,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    #[test]
    fn test_parse_list_envelope() {
        let body = r#"{"success": true, "data": [{"category_id": 1, "name": "Tools"}]}"#;
        let categories: Vec<Category> = Envelope::parse(body).unwrap().into_data().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name.as_deref(), Some("Tools"));
    }

    #[test]
    fn test_missing_success_is_malformed() {
        let err = Envelope::parse(r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));

        let err = Envelope::parse(r#"[{"category_id": 1}]"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));

        let err = Envelope::parse("<html>502</html>").unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));
    }

    #[test]
    fn test_missing_data_is_malformed_for_reads() {
        let envelope = Envelope::parse(r#"{"success": true}"#).unwrap();
        let err = envelope.into_data::<Vec<Category>>().unwrap_err();
        assert_eq!(err, EnvelopeError::Malformed("missing `data` field".into()));
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected_with_backend_message() {
        let envelope =
            Envelope::parse(r#"{"success": false, "error": "Category not found"}"#).unwrap();
        let err = envelope.into_data::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_mutation_ack_extracts_id() {
        let body = r#"{"success": true, "message": "Product created successfully", "product_id": 42}"#;
        let ack = Envelope::parse(body).unwrap().into_ack().unwrap();
        assert_eq!(ack.id, Some(42));
        assert_eq!(ack.message.as_deref(), Some("Product created successfully"));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(
            Envelope::error_text(r#"{"success": false, "error": "Missing required fields"}"#),
            Some("Missing required fields".to_string())
        );
        assert_eq!(Envelope::error_text("Internal Server Error"), None);
    }
}
