use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod chat_ui;
mod dom;
mod http;
mod storage;

pub use chat_ui::ChatWidget;
pub use http::GlooBackend;
pub use storage::BrowserStore;

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("SupportChat WASM initialized");
}

/// Attach the chat widget to the current page.
///
/// `base_url` overrides the backend address; otherwise the chat form's
/// `data-api-base` attribute is used, then the default local backend.
#[wasm_bindgen]
pub fn init_chat_widget(base_url: Option<String>) -> Result<(), JsValue> {
    ChatWidget::mount(base_url)
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
