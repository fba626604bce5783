use serde_json::Value;
use thiserror::Error;

use super::model::Command;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Malformed '{command}' command: {message}")]
    Malformed { command: String, message: String },

    #[error("Invalid '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl From<serde_json::Error> for CommandError {
    fn from(error: serde_json::Error) -> Self {
        CommandError::InvalidJson(error.to_string())
    }
}

/// Result of reading a command payload. Unknown types are kept apart from
/// malformed ones so the dispatcher can decide whether to ignore them.
/// A missing or non-string `type` counts as unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Known(Command),
    Unknown(String),
}

/// Stands in for the type name of a payload that carries none.
pub const MISSING_TYPE: &str = "<missing>";

pub fn decode_json(source: &str) -> Result<Decoded, CommandError> {
    let value: Value = serde_json::from_str(source)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Decoded, CommandError> {
    let kind = match value.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None => MISSING_TYPE.to_string(),
    };

    if !Command::is_known_kind(&kind) {
        return Ok(Decoded::Unknown(kind));
    }

    serde_json::from_value(value)
        .map(Decoded::Known)
        .map_err(|e| CommandError::Malformed {
            command: kind,
            message: e.to_string(),
        })
}
