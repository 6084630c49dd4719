//! Success envelope shared by every perception endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Normalize;

/// `{"message": ..., "result": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomResponse {
    pub message: String,
    pub result: Value,
}

impl AtomResponse {
    pub fn new(message: impl Into<String>, result: &impl Normalize) -> Self {
        Self {
            message: message.into(),
            result: result.normalize(),
        }
    }

    /// Envelope around an already-built JSON result
    pub fn from_value(message: impl Into<String>, result: Value) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }
}
