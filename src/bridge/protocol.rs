//! Wire types for the bridge protocol.
//!
//! ## Protocol
//!
//! Request (one JSON object per line):
//! ```json
//! {"command": "about"}
//! {"command": "status"}
//! ```
//!
//! Response (one JSON object per line, then the server closes the
//! connection):
//! ```json
//! {"result": "command-bridge 0.2.0 - bridge ok"}
//! {"result": {"status": 0, "stdout": "...", "stderr": ""}}
//! {"error": "unknown command: frobnicate"}
//! ```

use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// Inbound bridge request: exactly one key, the command string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// Command verb or registered alias.
    pub command: String,
}

impl BridgeRequest {
    /// Build a request for the given command string.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Outbound bridge response: a `result` payload or an `error` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    /// Build a success response from any JSON payload.
    pub fn result(payload: impl Into<serde_json::Value>) -> Self {
        Self {
            result: Some(payload.into()),
            error: None,
        }
    }

    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }

    /// Parse a response body and reject objects carrying neither field.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Bridge` if the body is not valid JSON or decodes
    /// to an object without `result` and without `error`.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(body.trim())?;
        if response.result.is_none() && response.error.is_none() {
            return Err(AppError::Bridge(
                "response carries neither result nor error".into(),
            ));
        }
        Ok(response)
    }

    /// Whether this response reports success.
    #[must_use]
    pub fn is_result(&self) -> bool {
        self.result.is_some()
    }

    /// Render the response for human consumption.
    ///
    /// String payloads print bare; structured payloads print as compact
    /// JSON. Error responses print the error message.
    #[must_use]
    pub fn summary(&self) -> String {
        if let Some(ref err) = self.error {
            return err.clone();
        }
        match self.result {
            Some(serde_json::Value::String(ref s)) => s.clone(),
            Some(ref value) => value.to_string(),
            None => String::new(),
        }
    }
}
