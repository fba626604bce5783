use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::decode::CommandError;

/// A single instruction for the stage, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SetExpression {
        expression: String,
    },
    /// Any `shape` payload is accepted; values that are not a known shape
    /// resolve to the all-hidden state.
    SetMouth {
        #[serde(default, deserialize_with = "lenient_shape")]
        shape: String,
    },
    TriggerProp {
        prop_id: String,
        animation: String,
    },
    PanTo {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<f64>,
    },
    SpeakText {
        text: String,
    },
}

impl Command {
    pub const KINDS: [&'static str; 5] = [
        "set_expression",
        "set_mouth",
        "trigger_prop",
        "pan_to",
        "speak_text",
    ];

    pub fn set_expression(expression: impl Into<String>) -> Self {
        Command::SetExpression {
            expression: expression.into(),
        }
    }

    pub fn set_mouth(shape: impl Into<String>) -> Self {
        Command::SetMouth { shape: shape.into() }
    }

    pub fn trigger_prop(prop_id: impl Into<String>, animation: impl Into<String>) -> Self {
        Command::TriggerProp {
            prop_id: prop_id.into(),
            animation: animation.into(),
        }
    }

    pub fn pan_to(x: f64, y: f64, duration: Option<f64>) -> Self {
        Command::PanTo { x, y, duration }
    }

    pub fn speak_text(text: impl Into<String>) -> Self {
        Command::SpeakText { text: text.into() }
    }

    /// Wire name of the command, as found in its `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SetExpression { .. } => "set_expression",
            Command::SetMouth { .. } => "set_mouth",
            Command::TriggerProp { .. } => "trigger_prop",
            Command::PanTo { .. } => "pan_to",
            Command::SpeakText { .. } => "speak_text",
        }
    }

    pub fn is_known_kind(kind: &str) -> bool {
        Self::KINDS.contains(&kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthShape {
    Neutral,
    Mid,
    Wide,
    Blink,
}

impl MouthShape {
    pub const ALL: [MouthShape; 4] = [
        MouthShape::Neutral,
        MouthShape::Mid,
        MouthShape::Wide,
        MouthShape::Blink,
    ];

    pub fn parse(shape: &str) -> Option<Self> {
        match shape {
            "neutral" => Some(MouthShape::Neutral),
            "mid" => Some(MouthShape::Mid),
            "wide" => Some(MouthShape::Wide),
            "blink" => Some(MouthShape::Blink),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MouthShape::Neutral => "neutral",
            MouthShape::Mid => "mid",
            MouthShape::Wide => "wide",
            MouthShape::Blink => "blink",
        }
    }
}

/// True if `name` can be added to a class list without the DOM throwing.
pub fn is_class_token(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_ascii_whitespace())
}

pub(crate) fn check_class_token(field: &'static str, value: &str) -> Result<(), CommandError> {
    if is_class_token(value) {
        Ok(())
    } else {
        Err(CommandError::InvalidField {
            field,
            reason: format!("'{}' is not a valid CSS class name", value),
        })
    }
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), CommandError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CommandError::InvalidField {
            field,
            reason: format!("{} is not a finite number", value),
        })
    }
}

pub(crate) fn check_duration(seconds: f64) -> Result<(), CommandError> {
    check_finite("duration", seconds)?;
    if seconds < 0.0 {
        return Err(CommandError::InvalidField {
            field: "duration",
            reason: format!("{} is negative", seconds),
        });
    }
    Ok(())
}

fn lenient_shape<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(shape) => shape,
        other => other.to_string(),
    })
}
