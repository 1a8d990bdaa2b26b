use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, Event, HtmlElement, HtmlOptionElement,
              HtmlSelectElement};
use std::fmt;
use std::rc::Rc;

use crate::binder::FormBinder;
use crate::dom::{self, DomError};
use crate::presets::PresetTable;

/// Text node heading the injected block.
const PICKER_LABEL: &str = "Custom Lists";
/// Tag of the injected container element.
const CONTAINER_TAG: &str = "preset-options";
/// Spacer elements inserted between the form and the picker.
const SPACER_COUNT: usize = 5;

#[derive(Debug, PartialEq)]
pub enum InjectError {
    AnchorNotFound { name: String },
    Dom(DomError),
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::AnchorNotFound { name } => {
                write!(f, "AnchorNotFound: no control named '{}' to insert the picker after", name)
            }
            InjectError::Dom(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InjectError::Dom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomError> for InjectError {
    fn from(error: DomError) -> Self {
        InjectError::Dom(error)
    }
}

impl From<InjectError> for JsValue {
    fn from(error: InjectError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// Scans a select element for the entry currently marked selected.
/// Change events do not carry the selection, so the options are walked.
pub fn selected_option(select: &HtmlSelectElement) -> Option<HtmlOptionElement> {
    let collection = select.options();
    for i in 0..collection.length() {
        if let Some(element) = collection.item(i) {
            if let Ok(option) = element.dyn_into::<HtmlOptionElement>() {
                if option.selected() {
                    return Some(option);
                }
            }
        }
    }
    None
}

/// Builds a preset picker next to a known form control and dispatches
/// user selections to the matching preset action.
///
/// Construction resolves the anchor and fails fast when it is missing:
/// a missing anchor means the injector was pointed at the wrong page,
/// which is a caller bug rather than a runtime condition to tolerate.
/// An instance is either unmounted or mounted; `mount` is the only
/// transition and there is no unmount.
pub struct PresetInjector {
    document: Document,
    anchor: Element,
    binder: Rc<FormBinder>,
    table: Rc<PresetTable>,
    spacer: &'static str,
    mounted: bool,
}

impl PresetInjector {
    pub fn new(
        document: &Document,
        anchor_name: &str,
        binder: Rc<FormBinder>,
        table: Rc<PresetTable>,
        spacer: &'static str,
    ) -> Result<PresetInjector, InjectError> {
        let anchor = dom::first_control_by_name(document, anchor_name).map_err(|_| {
            InjectError::AnchorNotFound { name: anchor_name.to_string() }
        })?;
        Ok(PresetInjector {
            document: document.clone(),
            anchor,
            binder,
            table,
            spacer,
            mounted: false,
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Builds the labeled picker, wires the change listener and inserts
    /// the block after the anchor's container.
    pub fn mount(&mut self) -> Result<(), InjectError> {
        let container = self.document.create_element(CONTAINER_TAG).map_err(DomError::from)?;
        container
            .append_child(&self.document.create_text_node(PICKER_LABEL))
            .map_err(DomError::from)?;
        container.append_child(&self.spacer_element()?.into()).map_err(DomError::from)?;

        let select = self.build_select()?;
        container.append_child(&select).map_err(DomError::from)?;

        let parent = self.insertion_parent()?;
        for _ in 0..SPACER_COUNT {
            parent.append_child(&self.spacer_element()?.into()).map_err(DomError::from)?;
        }
        parent.append_child(&container).map_err(DomError::from)?;

        self.mounted = true;
        console::log_1(
            &format!("Mounted preset picker with {} presets", self.table.len()).into(),
        );
        Ok(())
    }

    fn spacer_element(&self) -> Result<Element, InjectError> {
        Ok(self.document.create_element(self.spacer).map_err(DomError::from)?)
    }

    /// One option per table entry, in table order. The option value is
    /// the preset id; the visible text is the display label.
    fn build_select(&self) -> Result<HtmlSelectElement, InjectError> {
        let select: HtmlSelectElement = self
            .document
            .create_element("select")
            .map_err(DomError::from)?
            .dyn_into()
            .map_err(|_| DomError::ElementTypeError {
                name: "select".to_string(),
                expected_type: "HtmlSelectElement".to_string(),
            })?;

        for preset in self.table.iter() {
            let option: HtmlOptionElement = self
                .document
                .create_element("option")
                .map_err(DomError::from)?
                .dyn_into()
                .map_err(|_| DomError::ElementTypeError {
                    name: "option".to_string(),
                    expected_type: "HtmlOptionElement".to_string(),
                })?;
            option.set_value(preset.id());
            option.set_text(preset.label());
            select.append_child(&option).map_err(DomError::from)?;
        }

        let binder = Rc::clone(&self.binder);
        let table = Rc::clone(&self.table);
        let listening = select.clone();
        let listener = Closure::wrap(Box::new(move |_event: Event| {
            let Some(option) = selected_option(&listening) else {
                console::warn_1(&"Preset picker changed with no option selected".into());
                return;
            };
            let id = option.value();
            match table.get(&id) {
                Some(preset) => {
                    console::log_1(&format!("Applying preset '{}'", preset.label()).into());
                    preset.run(&binder);
                }
                None => {
                    console::error_1(
                        &format!("UnknownPreset: no preset registered for id '{}'", id).into(),
                    );
                }
            }
        }) as Box<dyn FnMut(Event)>);
        select
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .map_err(DomError::from)?;
        // The listener lives as long as the page does.
        listener.forget();

        Ok(select)
    }

    /// The picker lands in the anchor's offset parent, next to the form
    /// table cell the anchor renders in.
    fn insertion_parent(&self) -> Result<Element, InjectError> {
        self.anchor
            .dyn_ref::<HtmlElement>()
            .and_then(HtmlElement::offset_parent)
            .or_else(|| self.anchor.parent_element())
            .ok_or_else(|| {
                InjectError::Dom(DomError::JsError {
                    message: "Anchor control has no parent to insert after".to_string(),
                })
            })
    }
}
