use web_sys::{console, Document};
use serde::Serialize;

use crate::control::{Control, ControlState, Value};

/// Maps one logical field onto the host control registered under `host`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub group: &'static str,
    pub field: &'static str,
    pub host: &'static str,
}

impl FieldSpec {
    pub const fn new(group: &'static str, field: &'static str, host: &'static str) -> FieldSpec {
        FieldSpec { group, field, host }
    }
}

/// One baseline assignment, applied before any preset runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub group: &'static str,
    pub field: &'static str,
    pub value: Value,
}

impl Constant {
    pub fn new(group: &'static str, field: &'static str, value: impl Into<Value>) -> Constant {
        Constant { group, field, value: value.into() }
    }
}

#[derive(Debug)]
struct BoundField {
    group: &'static str,
    field: &'static str,
    control: Option<Control>,
}

/// Snapshot entry for one bound field; `state` is `None` when the field
/// is absent on the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    pub group: &'static str,
    pub field: &'static str,
    pub state: Option<ControlState>,
}

/// Owns the control handles for one host form and exposes the setters
/// presets are scripted against.
///
/// Controls are resolved once at bind time. A field the current page
/// does not render is recorded as absent, and every setter treats it as
/// a silent no-op: the pages share one logical schema but not every
/// page renders every control. Value/kind mismatches are reported to
/// the console and skip the field; nothing here raises to the caller.
pub struct FormBinder {
    fields: Vec<BoundField>,
}

impl FormBinder {
    /// Resolves every spec against the live document. Lookup failures
    /// are tolerated and recorded as absent fields.
    pub fn bind(document: &Document, specs: &[FieldSpec]) -> FormBinder {
        let mut fields = Vec::with_capacity(specs.len());
        let mut absent = 0usize;
        for spec in specs {
            let control = Control::resolve(document, spec.host);
            if control.is_none() {
                absent += 1;
            }
            fields.push(BoundField { group: spec.group, field: spec.field, control });
        }
        console::log_1(
            &format!(
                "Bound {} of {} fields ({} absent on this page)",
                specs.len() - absent,
                specs.len(),
                absent
            )
            .into(),
        );
        FormBinder { fields }
    }

    fn control(&self, group: &str, field: &str) -> Option<&Control> {
        self.fields
            .iter()
            .find(|f| f.group == group && f.field == field)
            .and_then(|f| f.control.as_ref())
    }

    /// Applies one value to one field, dispatching on the control kind.
    pub fn set_value(&self, group: &str, field: &str, value: &Value) {
        let Some(control) = self.control(group, field) else {
            return; // absent on this page
        };
        if let Err(mismatch) = control.apply(value) {
            console::warn_1(&format!("Skipped {}.{}: {}", group, field, mismatch).into());
        }
    }

    /// Applies a table of per-group defaults, establishing the baseline
    /// state every preset starts from.
    pub fn set_constants(&self, constants: &[Constant]) {
        for constant in constants {
            self.set_value(constant.group, constant.field, &constant.value);
        }
    }

    /// Zips equal-length key/value sequences against one field group.
    pub fn set_grouped(&self, group: &str, keys: &[&str], values: &[Value]) {
        if keys.len() != values.len() {
            console::warn_1(
                &format!(
                    "Key/value length mismatch for group '{}': {} keys, {} values",
                    group,
                    keys.len(),
                    values.len()
                )
                .into(),
            );
        }
        for (key, value) in keys.iter().zip(values) {
            self.set_value(group, key, value);
        }
    }

    pub fn set_scores(&self, keys: &[&str], values: &[Value]) {
        self.set_grouped("score", keys, values);
    }

    pub fn set_report_settings(&self, keys: &[&str], values: &[Value]) {
        self.set_grouped("report", keys, values);
    }

    /// Checks every named report column checkbox.
    pub fn set_columns(&self, keys: &[&str]) {
        for key in keys {
            self.set_value("columns", key, &Value::Flag(true));
        }
    }

    pub fn blank_columns(&self) {
        self.blank_group("columns");
    }

    /// Forces every checkbox in a group unchecked; other control kinds
    /// are untouched.
    pub fn blank_group(&self, group: &str) {
        for field in self.fields.iter().filter(|f| f.group == group) {
            if let Some(Control::Checkbox(input)) = &field.control {
                input.set_checked(false);
            }
        }
    }

    /// Additively marks a modification list. With `blank` unset or
    /// `Some(true)` the list is deselected first, so the call yields
    /// exactly the given set; an explicit `Some(false)` keeps prior
    /// selections.
    pub fn set_mods(&self, group: &str, field: &str, values: &[&str], blank: Option<bool>) {
        let blank = blank.unwrap_or(true);
        let Some(control) = self.control(group, field) else {
            return;
        };
        if blank {
            control.clear_selection();
        }
        if let Err(mismatch) = control.apply(&Value::items(values)) {
            console::warn_1(&format!("Skipped {}.{}: {}", group, field, mismatch).into());
        }
    }

    /// Turns on the quantitation settings of the raw group.
    pub fn set_quantitation(&self) {
        let keys = [
            "rawType", "mean", "meanVal", "stdDev", "intensity", "lhInt", "intThreshold",
            "csThreshold", "snrThreshold", "rtIntMin", "rtIntMax", "resolutionVal", "13CPerct",
            "15NPerct", "18OPerct", "ionWindow",
        ];
        let values = vec![
            Value::from("Quantitation"),
            Value::from(true),
            Value::from("2.0"),
            Value::from(true),
            Value::from(true),
            Value::from(true),
            Value::from(0),
            Value::from(0),
            Value::from("10.0"),
            Value::from("-10.0"),
            Value::from("30.0"),
            Value::from("70000.0"),
            Value::from(98),
            Value::from(98),
            Value::from(100),
            Value::from("0.4"),
        ];
        self.set_grouped("raw", &keys, &values);
    }

    /// Undoes every quantitation setting: blanks the raw checkboxes,
    /// then restores the non-checkbox fields to their defaults.
    pub fn blank_quantitation(&self) {
        self.blank_group("raw");
        let keys = [
            "rawType", "quantitation", "meanVal", "intThreshold", "csThreshold", "snrThreshold",
            "rtIntMin", "rtIntMax", "resolutionVal", "13CPerct", "15NPerct", "18OPerct",
            "ionWindow",
        ];
        let values = vec![
            Value::from("MS Precursor"),
            Value::from("DTT_C 2H (C)"),
            Value::from("2.0"),
            Value::from(0),
            Value::from(0),
            Value::from("10.0"),
            Value::from("-10.0"),
            Value::from("30.0"),
            Value::from("70000.0"),
            Value::from(98),
            Value::from(98),
            Value::from(100),
            Value::from("0.4"),
        ];
        self.set_grouped("raw", &keys, &values);
    }

    /// Reads back the current state of every bound field, in spec order.
    pub fn snapshot(&self) -> Vec<FieldState> {
        self.fields
            .iter()
            .map(|f| FieldState {
                group: f.group,
                field: f.field,
                state: f.control.as_ref().map(Control::current),
            })
            .collect()
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }
}
