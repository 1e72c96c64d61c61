//! The `{ success, data?, message? }` response wrapper.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Check `success` before trusting `data`, then decode `data` as `T`.
///
/// `what` names the request in error messages.
pub fn parse_envelope<T: DeserializeOwned>(body: Value, what: &str) -> Result<T> {
    let envelope: Envelope<Value> = serde_json::from_value(body)?;
    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("{} failed", what));
        return Err(Error::Api(message));
    }
    match envelope.data {
        Some(Value::Null) | None => Err(Error::MissingData(what.to_string())),
        Some(data) => Ok(serde_json::from_value(data)?),
    }
}

/// Like [`parse_envelope`] for calls whose payload is irrelevant.
pub fn expect_success(body: Value, what: &str) -> Result<()> {
    let envelope: Envelope<Value> = serde_json::from_value(body)?;
    if envelope.success {
        Ok(())
    } else {
        Err(Error::Api(
            envelope.message.unwrap_or_else(|| format!("{} failed", what)),
        ))
    }
}
