use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
              HtmlTextAreaElement};
use serde::Serialize;
use std::fmt;

use crate::dom;

/// Value shapes a preset may carry. Numeric settings travel as strings;
/// option matching normalizes both sides, so "2" and "2.0" select the
/// same entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Flag(bool),
    List(Vec<Value>),
}

impl Value {
    /// Shorthand for a list of string values, the shape multi-selects
    /// and control groups consume.
    pub fn items(values: &[&str]) -> Value {
        Value::List(values.iter().map(|v| Value::Str((*v).to_string())).collect())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Flag(_) => "flag",
            Value::List(_) => "list",
        }
    }

    /// Checkbox coercion: flags pass through, strings are truthy when
    /// non-blank, lists when non-empty.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Flag(b) => *b,
            Value::Str(s) => !s.trim().is_empty(),
            Value::List(l) => !l.is_empty(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Str(value.to_string())
    }
}

/// Raised when a value shape cannot be applied to a control kind. The
/// offending field is left untouched; callers report and move on.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMismatch {
    pub control: &'static str,
    pub value: &'static str,
}

impl fmt::Display for ValueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValueMismatch: a {} value is not applicable to a {} control",
            self.value, self.control
        )
    }
}

impl std::error::Error for ValueMismatch {}

/// Text controls come in two host flavors with the same semantics.
#[derive(Debug, Clone)]
pub enum TextControl {
    Input(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl TextControl {
    fn set(&self, value: &str) {
        match self {
            TextControl::Input(input) => input.set_value(value),
            TextControl::Area(area) => area.set_value(value),
        }
    }

    fn get(&self) -> String {
        match self {
            TextControl::Input(input) => input.value(),
            TextControl::Area(area) => area.value(),
        }
    }
}

/// A handle to one live form control. The variant is decided once, when
/// the control is resolved from the document; from then on every
/// application dispatches exhaustively on the variant.
#[derive(Debug, Clone)]
pub enum Control {
    Select(HtmlSelectElement),
    MultiSelect(HtmlSelectElement),
    Text(TextControl),
    Checkbox(HtmlInputElement),
    Group(Vec<Control>),
}

/// Current state of a control, as read back from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    Selected(Vec<String>),
    Text(String),
    Checked(bool),
    Group(Vec<ControlState>),
}

/// Option matching mirrors the host's loose comparison: trimmed string
/// equality first, numeric equality second, so "20" matches "20.0".
pub fn values_match(option_value: &str, wanted: &str) -> bool {
    let a = option_value.trim();
    let b = wanted.trim();
    if a == b {
        return true;
    }
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

fn options_of(select: &HtmlSelectElement) -> Vec<HtmlOptionElement> {
    let collection = select.options();
    let mut options = Vec::with_capacity(collection.length() as usize);
    for i in 0..collection.length() {
        if let Some(element) = collection.item(i) {
            if let Ok(option) = element.dyn_into::<HtmlOptionElement>() {
                options.push(option);
            }
        }
    }
    options
}

/// Marks every option whose value matches; other entries are left as-is.
/// For a single select the host enforces exclusivity on its own.
fn mark_matching_option(select: &HtmlSelectElement, wanted: &str) {
    for option in options_of(select) {
        if values_match(&option.value(), wanted) {
            option.set_selected(true);
        }
    }
}

impl Control {
    /// Classifies a live element into a control kind. Elements that are
    /// not form controls yield `None`.
    pub fn classify(element: &Element) -> Option<Control> {
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            let select = select.clone();
            return Some(if select.multiple() {
                Control::MultiSelect(select)
            } else {
                Control::Select(select)
            });
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            let input = input.clone();
            return Some(match input.type_().as_str() {
                "checkbox" => Control::Checkbox(input),
                _ => Control::Text(TextControl::Input(input)),
            });
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(Control::Text(TextControl::Area(area.clone())));
        }
        None
    }

    /// Resolves the controls registered under one host name. Zero
    /// matches is `None` (the page simply lacks the field); several
    /// matches form a control group applied element-wise.
    pub fn resolve(document: &Document, host_name: &str) -> Option<Control> {
        let mut controls: Vec<Control> = Vec::new();
        for element in dom::controls_by_name(document, host_name) {
            match Control::classify(&element) {
                Some(control) => controls.push(control),
                None => {
                    console::warn_1(
                        &format!(
                            "Ignoring element named '{}': <{}> is not a form control",
                            host_name,
                            element.tag_name().to_lowercase()
                        )
                        .into(),
                    );
                }
            }
        }
        match controls.len() {
            0 => None,
            1 => controls.pop(),
            _ => Some(Control::Group(controls)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Control::Select(_) => "single-select",
            Control::MultiSelect(_) => "multi-select",
            Control::Text(_) => "text",
            Control::Checkbox(_) => "checkbox",
            Control::Group(_) => "control-list",
        }
    }

    /// Applies a value to this control. Selection marking is additive:
    /// nothing is deselected unless `clear_selection` ran first.
    pub fn apply(&self, value: &Value) -> Result<(), ValueMismatch> {
        match self {
            Control::Select(select) => match value {
                Value::Str(s) => {
                    mark_matching_option(select, s);
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
            Control::MultiSelect(select) => match value {
                Value::List(entries) => {
                    for entry in entries {
                        match entry {
                            Value::Str(s) => mark_matching_option(select, s),
                            other => return Err(self.mismatch(other)),
                        }
                    }
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
            Control::Text(text) => match value {
                Value::Str(s) => {
                    text.set(s);
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
            Control::Checkbox(input) => match value {
                Value::List(_) => Err(self.mismatch(value)),
                other => {
                    input.set_checked(other.truthy());
                    Ok(())
                }
            },
            Control::Group(controls) => match value {
                Value::List(entries) => {
                    if entries.len() != controls.len() {
                        console::warn_1(
                            &format!(
                                "Control group length mismatch: {} controls, {} values",
                                controls.len(),
                                entries.len()
                            )
                            .into(),
                        );
                    }
                    for (control, entry) in controls.iter().zip(entries) {
                        control.apply(entry)?;
                    }
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
        }
    }

    /// Deselects every option of a select control. Other kinds are
    /// untouched; blanking checkboxes goes through the group-level path.
    pub fn clear_selection(&self) {
        match self {
            Control::Select(select) | Control::MultiSelect(select) => {
                for option in options_of(select) {
                    option.set_selected(false);
                }
            }
            Control::Group(controls) => {
                for control in controls {
                    control.clear_selection();
                }
            }
            Control::Text(_) | Control::Checkbox(_) => {}
        }
    }

    /// Reads the control's current state back from the document.
    pub fn current(&self) -> ControlState {
        match self {
            Control::Select(select) | Control::MultiSelect(select) => ControlState::Selected(
                options_of(select)
                    .into_iter()
                    .filter(|o| o.selected())
                    .map(|o| o.value())
                    .collect(),
            ),
            Control::Text(text) => ControlState::Text(text.get()),
            Control::Checkbox(input) => ControlState::Checked(input.checked()),
            Control::Group(controls) => {
                ControlState::Group(controls.iter().map(Control::current).collect())
            }
        }
    }

    fn mismatch(&self, value: &Value) -> ValueMismatch {
        ValueMismatch { control: self.kind_name(), value: value.kind_name() }
    }
}
