use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::StageConfig;
use crate::modules::command::model::{check_class_token, check_duration, check_finite};
use crate::modules::command::{decode_json, decode_value, Command, CommandError, Decoded, MouthShape};
use crate::modules::stage::{Display, StageView, ViewError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("Unknown command type '{0}'")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownCommand(String),
    MissingProp(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::UnknownCommand(kind) => write!(f, "unknown command type '{}'", kind),
            IgnoreReason::MissingProp(id) => write!(f, "prop '{}' not found", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

/// Maps each command onto exactly one handler, which mutates the view.
///
/// The dispatcher keeps no model of the stage: the view is the source of
/// truth and later commands overwrite what earlier ones did.
pub struct Dispatcher<V: StageView> {
    view: V,
    config: StageConfig,
}

impl<V: StageView> Dispatcher<V> {
    pub fn new(view: V, config: StageConfig) -> Self {
        Self { view, config }
    }

    pub fn with_default_config(view: V) -> Self {
        Self::new(view, StageConfig::default())
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Applies the configured initial expression and mouth shape.
    pub fn initialize(&mut self) -> Result<(), StageError> {
        let initial = self.config.initial.clone();
        self.set_expression(&initial.expression)?;
        self.set_mouth(&initial.mouth)?;
        Ok(())
    }

    pub fn dispatch_json(&mut self, source: &str) -> Result<Outcome, StageError> {
        let decoded = decode_json(source)?;
        self.dispatch_decoded(decoded)
    }

    pub fn dispatch_value(&mut self, value: Value) -> Result<Outcome, StageError> {
        let decoded = decode_value(value)?;
        self.dispatch_decoded(decoded)
    }

    pub fn dispatch_decoded(&mut self, decoded: Decoded) -> Result<Outcome, StageError> {
        match decoded {
            Decoded::Known(command) => self.dispatch(&command),
            Decoded::Unknown(kind) => {
                if self.config.strict_unknown_commands {
                    return Err(StageError::UnknownCommand(kind));
                }
                warn!("Ignoring unknown command type '{}'", kind);
                Ok(Outcome::Ignored(IgnoreReason::UnknownCommand(kind)))
            }
        }
    }

    pub fn dispatch(&mut self, command: &Command) -> Result<Outcome, StageError> {
        debug!(kind = command.kind(), "Received command: {:?}", command);

        match command {
            Command::SetExpression { expression } => self.set_expression(expression)?,
            Command::SetMouth { shape } => self.set_mouth(shape)?,
            Command::TriggerProp { prop_id, animation } => {
                return self.trigger_prop(prop_id, animation);
            }
            Command::PanTo { x, y, duration } => self.pan_to(*x, *y, *duration)?,
            Command::SpeakText { text } => self.speak_text(text),
        }

        Ok(Outcome::Applied)
    }

    pub fn set_expression(&mut self, expression: &str) -> Result<(), StageError> {
        check_class_token("expression", expression)?;

        let root = &self.config.elements.character_root;
        self.view.remove_classes(root, &self.config.expressions.exclusive)?;
        self.view.add_class(root, expression)?;

        info!("Lumina expression set to: {}", expression);
        Ok(())
    }

    /// Hides every mouth and blink element, then shows the one matching
    /// `shape`. Unknown shapes leave them all hidden.
    pub fn set_mouth(&mut self, shape: &str) -> Result<(), StageError> {
        let elements = &self.config.elements;
        for id in elements.mouth_set() {
            self.view.set_display(id, Display::None)?;
        }

        match MouthShape::parse(shape) {
            Some(mouth) => {
                self.view.set_display(elements.for_shape(mouth), Display::Block)?;
                if mouth == MouthShape::Blink {
                    self.view.set_display(&elements.mouth_neutral, Display::None)?;
                }
                info!("Lumina mouth set to: {}", shape);
            }
            None => warn!("Unknown mouth shape '{}', all mouth elements hidden", shape),
        }

        Ok(())
    }

    pub fn trigger_prop(&mut self, prop_id: &str, animation: &str) -> Result<Outcome, StageError> {
        if !self.view.has_element(prop_id) {
            warn!("Prop '{}' not found, skipping animation '{}'", prop_id, animation);
            return Ok(Outcome::Ignored(IgnoreReason::MissingProp(prop_id.to_string())));
        }

        check_class_token("animation", animation)?;

        self.view.set_display(prop_id, Display::Block)?;
        self.view.add_class(prop_id, animation)?;
        self.view.clear_class_on_animation_end(prop_id, animation)?;

        info!("Triggered animation {} for prop {}", animation, prop_id);
        Ok(Outcome::Applied)
    }

    pub fn pan_to(&mut self, x: f64, y: f64, duration: Option<f64>) -> Result<(), StageError> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        let duration = duration.unwrap_or(self.config.camera.default_pan_duration);
        check_duration(duration)?;

        let canvas = &self.config.elements.canvas;
        let transition = format!(
            "transform {}s {}",
            css_number(duration),
            self.config.camera.easing
        );
        let transform = format!("translate({}px, {}px)", css_number(x), css_number(y));

        self.view.set_style(canvas, "transition", &transition)?;
        self.view.set_style(canvas, "transform", &transform)?;

        info!("Panning canvas to: {} {}", x, y);
        Ok(())
    }

    /// Lip sync is not implemented; the request is only logged.
    pub fn speak_text(&self, text: &str) {
        info!("Lumina is preparing to speak: {}", text);
    }
}

/// Formats a finite number the way the browser prints it in a style string:
/// plain decimals in [1e-6, 1e21), exponent form (`1e+21`, `1.5e-7`) outside.
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}
