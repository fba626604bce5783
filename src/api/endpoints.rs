use wasm_bindgen::prelude::*;

use crate::api::types::{dispatch_json_report, dispatch_value_report, DispatchReport};
use crate::config::StageConfig;
use crate::modules::dispatch::Dispatcher;
use crate::modules::stage::DomView;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    web_sys::console::log_1(&"[LuminaStage] module loaded".into());
}

/// The stage as seen from the page. One instance drives one set of elements.
#[wasm_bindgen]
pub struct LuminaStage {
    dispatcher: Dispatcher<DomView>,
}

#[wasm_bindgen]
impl LuminaStage {
    /// Builds a stage over the current document, optionally configured from a
    /// TOML string.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<LuminaStage, JsValue> {
        let config = match config_toml {
            Some(source) => StageConfig::from_toml_str(&source).map_err(to_js_error)?,
            None => StageConfig::default(),
        };
        let view = DomView::new().map_err(to_js_error)?;

        Ok(Self {
            dispatcher: Dispatcher::new(view, config),
        })
    }

    pub fn initialize(&mut self) -> Result<(), JsValue> {
        self.dispatcher.initialize().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = handleCommand)]
    pub fn handle_command(&mut self, command: JsValue) -> Result<JsValue, JsValue> {
        let report = match serde_wasm_bindgen::from_value::<serde_json::Value>(command) {
            Ok(value) => dispatch_value_report(&mut self.dispatcher, value),
            Err(e) => DispatchReport::failed(None, format!("Invalid command object: {}", e)),
        };
        to_js_report(&report)
    }

    #[wasm_bindgen(js_name = handleCommandJson)]
    pub fn handle_command_json(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let report = dispatch_json_report(&mut self.dispatcher, json);
        to_js_report(&report)
    }
}

fn to_js_report(report: &DispatchReport) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(report).map_err(to_js_error)
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
