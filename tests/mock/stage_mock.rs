#![allow(dead_code)]

use lumina_stage::{Dispatcher, Display, InMemoryStage, StageConfig, StageView, ViewError};
use mockall::mock;

mock! {
    pub Stage {}

    impl StageView for Stage {
        fn has_element(&self, id: &str) -> bool;
        fn set_display(&mut self, id: &str, display: Display) -> Result<(), ViewError>;
        fn add_class(&mut self, id: &str, class: &str) -> Result<(), ViewError>;
        fn remove_classes(&mut self, id: &str, classes: &[String]) -> Result<(), ViewError>;
        fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), ViewError>;
        fn clear_class_on_animation_end(&mut self, id: &str, class: &str) -> Result<(), ViewError>;
    }
}

pub struct StageTestHelpers;

impl StageTestHelpers {
    /// Dispatcher over a stage holding the default elements plus `props`.
    pub fn dispatcher_with_props(props: &[&str]) -> Dispatcher<InMemoryStage> {
        let config = StageConfig::default();
        let mut stage = InMemoryStage::from_config(&config);
        for prop in props {
            stage.insert_element(*prop);
        }
        Dispatcher::new(stage, config)
    }

    pub fn dispatcher() -> Dispatcher<InMemoryStage> {
        Self::dispatcher_with_props(&[])
    }

    /// Ids of the mouth and blink elements currently displayed as block.
    pub fn visible_mouth_elements(dispatcher: &Dispatcher<InMemoryStage>) -> Vec<String> {
        dispatcher
            .config()
            .elements
            .mouth_set()
            .into_iter()
            .filter(|id| {
                dispatcher
                    .view()
                    .element(id)
                    .map(|e| e.is_visible())
                    .unwrap_or(false)
            })
            .map(|id| id.to_string())
            .collect()
    }

    pub fn root_classes(dispatcher: &Dispatcher<InMemoryStage>) -> Vec<String> {
        let root = &dispatcher.config().elements.character_root;
        dispatcher
            .view()
            .element(root)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }
}

pub struct TestCommands;

impl TestCommands {
    pub fn valid_shapes() -> Vec<&'static str> {
        vec!["neutral", "mid", "wide", "blink"]
    }

    pub fn invalid_shapes() -> Vec<&'static str> {
        vec!["", "open", "NEUTRAL", "smile", " mid"]
    }

    /// `set_mouth` payloads whose `shape` is not a usable string.
    pub fn invalid_shape_payloads() -> Vec<&'static str> {
        vec![
            r#"{"type": "set_mouth", "shape": 5}"#,
            r#"{"type": "set_mouth", "shape": null}"#,
            r#"{"type": "set_mouth", "shape": {"name": "wide"}}"#,
            r#"{"type": "set_mouth"}"#,
            r#"{"type": "set_mouth", "shape": "grin"}"#,
        ]
    }

    pub fn show_script() -> Vec<&'static str> {
        vec![
            r#"{"type": "set_expression", "expression": "happy"}"#,
            r#"{"type": "set_mouth", "shape": "wide"}"#,
            r#"{"type": "trigger_prop", "prop_id": "star", "animation": "pulse"}"#,
            r#"{"type": "pan_to", "x": -500, "y": -300, "duration": 2}"#,
            r#"{"type": "speak_text", "text": "Welcome back to the stream"}"#,
            r#"{"type": "display_image", "url": "https://example.com/mars.png"}"#,
        ]
    }
}
