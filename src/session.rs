use wasm_bindgen::JsValue;
use web_sys::{console, Document};
use std::fmt;
use std::rc::Rc;

use crate::binder::FormBinder;
use crate::dom::{self, DomError};
use crate::inject::{InjectError, PresetInjector};
use crate::presets::{self, PresetTable, PresetTableError};
use crate::schema;

/// The host pages this layer knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    BatchTag,
    SearchCompare,
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::BatchTag => "Batch-Tag",
            PageKind::SearchCompare => "Search Compare",
        }
    }
}

/// Decides which page is loaded from the form header text. Batch-Tag
/// matches by prefix so the hosted "Batch-Tag Web" variant is covered.
pub fn identify_page(title: &str) -> Option<PageKind> {
    let trimmed = title.trim();
    if trimmed.starts_with("Batch-Tag") {
        Some(PageKind::BatchTag)
    } else if trimmed.starts_with("Search Compare") {
        Some(PageKind::SearchCompare)
    } else {
        None
    }
}

#[derive(Debug, PartialEq)]
pub enum SessionError {
    UnknownPage { title: String },
    UnknownPreset { id: String },
    Dom(DomError),
    Inject(InjectError),
    Table(PresetTableError),
    Serialization { message: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownPage { title } => {
                write!(f, "UnknownPage: header '{}' does not name a supported form", title)
            }
            SessionError::UnknownPreset { id } => {
                write!(f, "UnknownPreset: no preset registered for id '{}'", id)
            }
            SessionError::Dom(e) => write!(f, "{}", e),
            SessionError::Inject(e) => write!(f, "{}", e),
            SessionError::Table(e) => write!(f, "{}", e),
            SessionError::Serialization { message } => write!(f, "SerializationError: {}", message),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Dom(e) => Some(e),
            SessionError::Inject(e) => Some(e),
            SessionError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomError> for SessionError {
    fn from(error: DomError) -> Self {
        SessionError::Dom(error)
    }
}

impl From<InjectError> for SessionError {
    fn from(error: InjectError) -> Self {
        SessionError::Inject(error)
    }
}

impl From<PresetTableError> for SessionError {
    fn from(error: PresetTableError) -> Self {
        SessionError::Table(error)
    }
}

impl From<SessionError> for JsValue {
    fn from(error: SessionError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// One page-lifetime automation context: the bound form, the preset
/// table and the mounted picker. Built once per page load and handed
/// to whoever needs it; there is no ambient module state.
pub struct Session {
    kind: PageKind,
    binder: Rc<FormBinder>,
    table: Rc<PresetTable>,
    injector: PresetInjector,
}

impl Session {
    /// Identifies the loaded page, binds its schema, applies the
    /// baseline constants and mounts the preset picker.
    pub fn attach(document: &Document) -> Result<Session, SessionError> {
        let title = dom::header_text(document, schema::HEADER_CLASS)?;
        let kind = identify_page(&title)
            .ok_or(SessionError::UnknownPage { title: title.clone() })?;

        let (specs, constants, table, anchor) = match kind {
            PageKind::BatchTag => (
                schema::BATCH_TAG_FIELDS,
                schema::batch_tag_constants(),
                presets::batch_tag_presets()?,
                schema::BATCH_TAG_ANCHOR,
            ),
            PageKind::SearchCompare => (
                schema::SEARCH_COMPARE_FIELDS,
                schema::search_compare_constants(),
                presets::search_compare_presets()?,
                schema::SEARCH_COMPARE_ANCHOR,
            ),
        };

        let binder = Rc::new(FormBinder::bind(document, specs));
        binder.set_constants(&constants);

        let table = Rc::new(table);
        let mut injector = PresetInjector::new(
            document,
            anchor,
            Rc::clone(&binder),
            Rc::clone(&table),
            schema::SPACER_TAG,
        )?;
        injector.mount()?;

        console::log_1(&format!("Attached preset session to {} page", kind.name()).into());
        Ok(Session { kind, binder, table, injector })
    }

    /// Waits for the form header to render, then attaches. Covers CGI
    /// pages that finish rendering after script injection.
    pub async fn attach_when_ready(timeout_ms: Option<u32>) -> Result<Session, SessionError> {
        dom::wait_for_header(schema::HEADER_CLASS, timeout_ms).await?;
        let (_window, document) = dom::window_document()?;
        Session::attach(&document)
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn binder(&self) -> &FormBinder {
        &self.binder
    }

    pub fn is_mounted(&self) -> bool {
        self.injector.is_mounted()
    }

    /// Applies a preset by id, the same dispatch the picker performs.
    pub fn apply(&self, preset_id: &str) -> Result<(), SessionError> {
        let preset = self
            .table
            .get(preset_id)
            .ok_or_else(|| SessionError::UnknownPreset { id: preset_id.to_string() })?;
        console::log_1(&format!("Applying preset '{}'", preset.label()).into());
        preset.run(&self.binder);
        Ok(())
    }

    pub fn snapshot_json(&self) -> Result<String, SessionError> {
        self.binder
            .snapshot_json()
            .map_err(|e| SessionError::Serialization { message: e.to_string() })
    }
}
