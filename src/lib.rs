use wasm_bindgen::prelude::*;

use crate::session::Session;

pub mod binder;
pub mod control;
pub mod dom;
pub mod inject;
pub mod presets;
pub mod schema;
pub mod session;

// Expose the preset layer to JavaScript
#[wasm_bindgen]
pub struct PresetScripts {
    session: Session,
}

#[wasm_bindgen]
impl PresetScripts {
    /// Attaches to the currently loaded form page and mounts the
    /// preset picker.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PresetScripts, JsValue> {
        let (_window, document) = dom::window_document()?;
        let session = Session::attach(&document)?;
        Ok(PresetScripts { session })
    }

    /// Name of the page this instance is attached to.
    pub fn page(&self) -> String {
        self.session.kind().name().to_string()
    }

    /// Applies a preset by its stable id, exactly as the picker would.
    pub fn apply(&self, preset_id: &str) -> Result<(), JsValue> {
        self.session.apply(preset_id).map_err(JsValue::from)
    }

    /// Current state of every bound field, as a JSON array string.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.session.snapshot_json().map_err(JsValue::from)
    }
}

/// Waits for the form header to render before attaching; for loaders
/// that inject before the CGI page finishes.
#[wasm_bindgen]
pub async fn attach_when_ready(timeout_ms: Option<u32>) -> Result<PresetScripts, JsValue> {
    let session = Session::attach_when_ready(timeout_ms).await.map_err(JsValue::from)?;
    Ok(PresetScripts { session })
}

// Initialize WASM module and log to console
#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once(); // Better panic messages in browser
    web_sys::console::log_1(&"Prospector presets initialized!".into());
    Ok(())
}
