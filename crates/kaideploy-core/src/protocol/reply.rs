//! Inbound replies.
//!
//! Replies are schemaless; the session looks up the fields it needs by name.

use serde_json::Value;

use crate::error::{ProtocolError, Result};

/// One decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply(Value);

impl Reply {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// String field, if present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Unsigned integer field, if present and representable.
    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.0.get(name).and_then(Value::as_u64)
    }

    /// String field that the caller cannot continue without.
    pub fn require_str(&self, field: &'static str, context: &'static str) -> Result<&str> {
        self.str_field(field)
            .ok_or_else(|| ProtocolError::MissingField { field, context }.into())
    }

    /// Remote error report (`error` plus optional `message`), if any.
    pub fn remote_error(&self) -> Option<(&str, Option<&str>)> {
        self.str_field("error").map(|e| (e, self.str_field("message")))
    }
}
