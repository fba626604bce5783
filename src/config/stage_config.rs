use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::modules::command::{is_class_token, MouthShape};

pub const DEFAULT_EXPRESSIONS: [&str; 3] = ["happy", "sad", "neutral"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse stage config: {0}")]
    Parse(String),

    #[error("Invalid stage config: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

/// DOM identifiers of the fixed stage elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub character_root: String,
    pub mouth_neutral: String,
    pub mouth_mid: String,
    pub mouth_wide: String,
    pub blinks: String,
    pub canvas: String,
}

impl ElementIds {
    /// Mouth and blink elements, in the order they are hidden.
    pub fn mouth_set(&self) -> [&str; 4] {
        [
            self.mouth_neutral.as_str(),
            self.mouth_mid.as_str(),
            self.mouth_wide.as_str(),
            self.blinks.as_str(),
        ]
    }

    pub fn all(&self) -> [&str; 6] {
        [
            self.character_root.as_str(),
            self.mouth_neutral.as_str(),
            self.mouth_mid.as_str(),
            self.mouth_wide.as_str(),
            self.blinks.as_str(),
            self.canvas.as_str(),
        ]
    }

    pub fn for_shape(&self, shape: MouthShape) -> &str {
        match shape {
            MouthShape::Neutral => self.mouth_neutral.as_str(),
            MouthShape::Mid => self.mouth_mid.as_str(),
            MouthShape::Wide => self.mouth_wide.as_str(),
            MouthShape::Blink => self.blinks.as_str(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for id in self.all() {
            if id.trim().is_empty() {
                return Err("Element identifiers must not be empty".to_string());
            }
            if !seen.insert(id) {
                return Err(format!("Element identifier '{}' is used more than once", id));
            }
        }
        Ok(())
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            character_root: "lumina".to_string(),
            mouth_neutral: "lumina-mouth-neutral".to_string(),
            mouth_mid: "lumina-mouth-mid".to_string(),
            mouth_wide: "lumina-mouth-wide".to_string(),
            blinks: "lumina-blinks".to_string(),
            canvas: "giant-canvas".to_string(),
        }
    }
}

/// Expression classes that replace each other on the character root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    pub exclusive: Vec<String>,
}

impl ExpressionConfig {
    pub fn new<I, S>(exclusive: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclusive: exclusive.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for name in &self.exclusive {
            if !is_class_token(name) {
                return Err(format!("Expression '{}' is not a valid CSS class name", name));
            }
        }
        Ok(())
    }
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXPRESSIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_pan_duration: f64,
    pub easing: String,
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_pan_duration.is_finite() || self.default_pan_duration < 0.0 {
            return Err(format!(
                "default_pan_duration is {}, but must be a finite, non-negative number of seconds",
                self.default_pan_duration
            ));
        }
        if self.easing.trim().is_empty() {
            return Err("Camera easing must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_pan_duration: 1.0,
            easing: "ease-in-out".to_string(),
        }
    }
}

/// State applied by `Dispatcher::initialize` when the page loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub expression: String,
    pub mouth: String,
}

impl InitialState {
    pub fn validate(&self) -> Result<(), String> {
        if !is_class_token(&self.expression) {
            return Err(format!(
                "Initial expression '{}' is not a valid CSS class name",
                self.expression
            ));
        }
        if MouthShape::parse(&self.mouth).is_none() {
            return Err(format!("Initial mouth shape '{}' is not a known shape", self.mouth));
        }
        Ok(())
    }
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            expression: "neutral".to_string(),
            mouth: "neutral".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Reject unknown command types instead of ignoring them.
    pub strict_unknown_commands: bool,
    pub elements: ElementIds,
    pub expressions: ExpressionConfig,
    pub camera: CameraConfig,
    pub initial: InitialState,
}

impl StageConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: StageConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.elements.validate().map_err(ConfigError::Invalid)?;
        self.expressions.validate().map_err(ConfigError::Invalid)?;
        self.camera.validate().map_err(ConfigError::Invalid)?;
        self.initial.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraConfig, ConfigError, ElementIds, ExpressionConfig, InitialState, StageConfig};

    #[test]
    fn test_stage_config_default() {
        let config = StageConfig::default();
        assert!(!config.strict_unknown_commands);
        assert_eq!(config.elements.character_root, "lumina");
        assert_eq!(config.elements.canvas, "giant-canvas");
        assert_eq!(config.expressions.exclusive, vec!["happy", "sad", "neutral"]);
        assert_eq!(config.camera.default_pan_duration, 1.0);
        assert_eq!(config.camera.easing, "ease-in-out");
        assert_eq!(config.initial.expression, "neutral");
        assert_eq!(config.initial.mouth, "neutral");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_element_ids_mouth_set_order() {
        let ids = ElementIds::default();
        assert_eq!(
            ids.mouth_set(),
            ["lumina-mouth-neutral", "lumina-mouth-mid", "lumina-mouth-wide", "lumina-blinks"]
        );
    }

    #[test]
    fn test_element_ids_rejects_duplicates() {
        let mut ids = ElementIds::default();
        ids.mouth_mid = ids.mouth_wide.clone();
        assert!(ids.validate().is_err());

        ids.mouth_mid = " ".to_string();
        assert!(ids.validate().is_err());
    }

    #[test]
    fn test_expression_config() {
        assert!(ExpressionConfig::new(["happy", "angry"]).validate().is_ok());
        assert!(ExpressionConfig::new(["very happy"]).validate().is_err());
        assert!(ExpressionConfig::new([""]).validate().is_err());
    }

    #[test]
    fn test_camera_config() {
        let mut camera = CameraConfig::default();
        assert!(camera.validate().is_ok());

        camera.default_pan_duration = -1.0;
        assert!(camera.validate().is_err());

        camera.default_pan_duration = f64::NAN;
        assert!(camera.validate().is_err());
    }

    #[test]
    fn test_initial_state() {
        let mut initial = InitialState::default();
        assert!(initial.validate().is_ok());

        initial.mouth = "pout".to_string();
        assert!(initial.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StageConfig::from_toml_str(
            r#"
            strict_unknown_commands = true

            [elements]
            canvas = "world"
            "#,
        )
        .unwrap();

        assert!(config.strict_unknown_commands);
        assert_eq!(config.elements.canvas, "world");
        assert_eq!(config.elements.character_root, "lumina");
        assert_eq!(config.camera.default_pan_duration, 1.0);
    }

    #[test]
    fn test_invalid_toml() {
        let result = StageConfig::from_toml_str("elements = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = StageConfig::from_toml_str("[camera]\ndefault_pan_duration = -2.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
