use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement};

use super::view::{Display, StageView, ViewError};

const ANIMATION_END: &str = "animationend";

/// Stage backed by the live page. Elements are looked up by id on every
/// call, so nodes added after construction are picked up.
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new() -> Result<Self, ViewError> {
        let window = web_sys::window().ok_or_else(|| ViewError::Dom("No window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ViewError::Dom("No document".to_string()))?;
        Ok(Self::with_document(document))
    }

    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Result<Element, ViewError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement, ViewError> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ViewError::Dom(format!("Element '{}' is not an HTML element", id)))
    }
}

fn js_error(error: JsValue) -> ViewError {
    ViewError::Dom(error.as_string().unwrap_or_else(|| format!("{:?}", error)))
}

impl StageView for DomView {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), ViewError> {
        self.set_style(id, "display", display.as_css())
    }

    fn add_class(&mut self, id: &str, class: &str) -> Result<(), ViewError> {
        self.element(id)?.class_list().add_1(class).map_err(js_error)
    }

    fn remove_classes(&mut self, id: &str, classes: &[String]) -> Result<(), ViewError> {
        let class_list = self.element(id)?.class_list();
        for class in classes {
            class_list.remove_1(class).map_err(js_error)?;
        }
        Ok(())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), ViewError> {
        self.html_element(id)?
            .style()
            .set_property(property, value)
            .map_err(js_error)
    }

    fn clear_class_on_animation_end(&mut self, id: &str, class: &str) -> Result<(), ViewError> {
        let element = self.element(id)?;
        let target = element.clone();
        let class = class.to_string();

        // Freed by wasm-bindgen after its single invocation.
        let callback = Closure::once_into_js(move || {
            if let Err(e) = target.class_list().remove_1(&class) {
                tracing::warn!("Failed to clear animation class '{}': {:?}", class, e);
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_once(true);

        element
            .add_event_listener_with_callback_and_add_event_listener_options(
                ANIMATION_END,
                callback.unchecked_ref(),
                &options,
            )
            .map_err(js_error)
    }
}
