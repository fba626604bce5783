use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Element '{0}' not found")]
    MissingElement(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// The elements the dispatcher drives, addressed by identifier.
///
/// Every mutating call fails with `ViewError::MissingElement` when the
/// identifier does not resolve at call time.
pub trait StageView {
    fn has_element(&self, id: &str) -> bool;

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), ViewError>;

    fn add_class(&mut self, id: &str, class: &str) -> Result<(), ViewError>;

    fn remove_classes(&mut self, id: &str, classes: &[String]) -> Result<(), ViewError>;

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), ViewError>;

    /// Removes `class` from the element the next time one of its animations
    /// ends. The listener fires once.
    fn clear_class_on_animation_end(&mut self, id: &str, class: &str) -> Result<(), ViewError>;
}
