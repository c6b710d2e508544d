use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity of a response message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gravity {
    Info,
    Warning,
    Error,
    Fatal,
}

/// A message attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub gravity: Gravity,
    #[schema(example = "404 page not found (uri: /nope, method: GET)")]
    pub value: String,
}

impl Message {
    pub fn new(gravity: Gravity, value: impl Into<String>) -> Self {
        Self {
            gravity,
            value: value.into(),
        }
    }
}

/// Envelope returned by resource methods and by unmatched routes
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DefaultResponse {
    pub messages: Vec<Message>,
    pub data: Option<serde_json::Value>,
    pub schema: Option<serde_json::Value>,
}

impl DefaultResponse {
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// Liveness / readiness probe body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponse {
    #[schema(example = "ok")]
    pub status: String,
}

impl ProbeResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
