use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};
use std::fmt;
use gloo_timers::future::{IntervalStream, TimeoutFuture};
use futures_util::stream::StreamExt;
use futures::future::{select, Either};

#[derive(Debug, PartialEq)]
pub enum DomError {
    ControlNotFound { name: String },
    HeaderNotFound { class: String, message: Option<String> },
    ElementTypeError { name: String, expected_type: String },
    JsError { message: String },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::ControlNotFound { name } => {
                write!(f, "ControlNotFound: No form control found for name '{}'", name)
            }
            DomError::HeaderNotFound { class, message } => {
                if let Some(msg) = message {
                    write!(f, "{}", msg)
                } else {
                    write!(f, "HeaderNotFound: No element found for class '{}'", class)
                }
            }
            DomError::ElementTypeError { name, expected_type } => write!(
                f,
                "ElementTypeError: Element named '{}' is not of expected type '{}'",
                name, expected_type
            ),
            DomError::JsError { message } => write!(f, "JsError: {}", message),
        }
    }
}

impl std::error::Error for DomError {}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::JsError {
            message: value.as_string().unwrap_or_else(|| "Unknown JsValue error".to_string()),
        }
    }
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

// Helper function to get window and document
pub fn window_document() -> Result<(Window, Document), DomError> {
    let window = web_sys::window().ok_or_else(|| DomError::JsError {
        message: "Failed to get window object".to_string(),
    })?;
    let document = window.document().ok_or_else(|| DomError::JsError {
        message: "Failed to get document object".to_string(),
    })?;
    Ok((window, document))
}

/// Collects every element carrying the given `name` attribute, in document
/// order. Form controls on the host pages are addressed by name, not id.
pub fn controls_by_name(document: &Document, name: &str) -> Vec<Element> {
    let nodes = document.get_elements_by_name(name);
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            match node.dyn_into::<Element>() {
                Ok(element) => elements.push(element),
                Err(_) => {
                    web_sys::console::warn_1(
                        &format!("Name '{}' matched a Node that is not an Element.", name).into(),
                    );
                }
            }
        }
    }
    elements
}

pub fn first_control_by_name(document: &Document, name: &str) -> Result<Element, DomError> {
    controls_by_name(document, name)
        .into_iter()
        .next()
        .ok_or_else(|| DomError::ControlNotFound { name: name.to_string() })
}

/// Reads the page header text used for page identification. The host
/// renders one element with this class per form page.
pub fn header_text(document: &Document, class: &str) -> Result<String, DomError> {
    let header = document
        .get_elements_by_class_name(class)
        .item(0)
        .ok_or_else(|| DomError::HeaderNotFound { class: class.to_string(), message: None })?;
    Ok(header.text_content().unwrap_or_default().trim().to_string())
}

/// Polls until the page header appears, or errors after `timeout_ms`.
/// Slow CGI pages can render the form after the script is injected.
pub async fn wait_for_header(class: &str, timeout_ms: Option<u32>) -> Result<String, DomError> {
    const DEFAULT_TIMEOUT_MS: u32 = 5000;
    const INTERVAL_MS: u32 = 100; // Polling interval
    let timeout_duration = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

    let main_future = async {
        let mut interval = IntervalStream::new(INTERVAL_MS);
        loop {
            let (_window, document) = window_document()?;
            match header_text(&document, class) {
                Ok(title) => return Ok(title),
                Err(DomError::HeaderNotFound { .. }) => { /* continue polling */ }
                Err(e) => return Err(e),
            }
            StreamExt::next(&mut interval).await;
        }
    };

    let timeout_event = TimeoutFuture::new(timeout_duration);

    match select(Box::pin(main_future), timeout_event).await {
        Either::Left((result, _)) => result,
        Either::Right((_, _)) => Err(DomError::HeaderNotFound {
            class: class.to_string(),
            message: Some(format!(
                "Header '{}' not found after {}ms timeout",
                class, timeout_duration
            )),
        }),
    }
}
