use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::view::{Display, StageView, ViewError};
use crate::config::StageConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
}

impl ElementState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn display(&self) -> Option<&str> {
        self.style("display")
    }

    pub fn is_visible(&self) -> bool {
        self.display() == Some(Display::Block.as_css())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PendingRemoval {
    element: String,
    class: String,
}

/// A stage held in memory, used off-browser and in tests. Elements exist only
/// once registered, mirroring identifiers present in the page.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStage {
    elements: BTreeMap<String, ElementState>,
    pending: Vec<PendingRemoval>,
}

impl InMemoryStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stage holding every fixed element the configuration names.
    pub fn from_config(config: &StageConfig) -> Self {
        let mut stage = Self::new();
        for id in config.elements.all() {
            stage.insert_element(id);
        }
        stage
    }

    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.insert_element(id);
        self
    }

    pub fn insert_element(&mut self, id: impl Into<String>) {
        self.elements.entry(id.into()).or_default();
    }

    pub fn remove_element(&mut self, id: &str) -> Option<ElementState> {
        self.pending.retain(|p| p.element != id);
        self.elements.remove(id)
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn pending_animations(&self, id: &str) -> usize {
        self.pending.iter().filter(|p| p.element == id).count()
    }

    /// Fires the animation end on `id`: every listener registered on that
    /// element runs and is dropped. Returns how many ran.
    pub fn complete_animation(&mut self, id: &str) -> usize {
        let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.element == id);
        self.pending = kept;

        if let Some(element) = self.elements.get_mut(id) {
            for removal in &fired {
                element.classes.retain(|c| c != &removal.class);
            }
        }
        fired.len()
    }

    pub fn complete_all_animations(&mut self) -> usize {
        let ids: Vec<String> = self.pending.iter().map(|p| p.element.clone()).collect();
        let mut fired = 0;
        for id in ids {
            fired += self.complete_animation(&id);
        }
        fired
    }

    pub fn snapshot(&self) -> BTreeMap<String, ElementState> {
        self.elements.clone()
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut ElementState, ViewError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }
}

impl StageView for InMemoryStage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), ViewError> {
        self.set_style(id, "display", display.as_css())
    }

    fn add_class(&mut self, id: &str, class: &str) -> Result<(), ViewError> {
        let element = self.element_mut(id)?;
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_classes(&mut self, id: &str, classes: &[String]) -> Result<(), ViewError> {
        let element = self.element_mut(id)?;
        element.classes.retain(|c| !classes.contains(c));
        Ok(())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), ViewError> {
        let element = self.element_mut(id)?;
        element.styles.insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn clear_class_on_animation_end(&mut self, id: &str, class: &str) -> Result<(), ViewError> {
        self.element_mut(id)?;
        self.pending.push(PendingRemoval {
            element: id.to_string(),
            class: class.to_string(),
        });
        Ok(())
    }
}
