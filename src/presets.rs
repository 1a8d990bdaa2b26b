//! Named preset actions and the tables the picker is populated from.
//! Actions are pure side-effect scripts against a bound form: applying
//! the same preset twice from the same baseline yields the same state.

use web_sys::console;
use std::fmt;

use crate::binder::FormBinder;
use crate::control::Value;
use crate::dom;

pub type PresetAction = Box<dyn Fn(&FormBinder)>;

/// One picker entry. The `id` is the stable dispatch key carried on the
/// rendered option; the label is display-only and shown to the user.
pub struct Preset {
    id: &'static str,
    label: &'static str,
    action: PresetAction,
}

impl Preset {
    pub fn new(
        id: &'static str,
        label: &'static str,
        action: impl Fn(&FormBinder) + 'static,
    ) -> Preset {
        Preset { id, label, action: Box::new(action) }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn run(&self, binder: &FormBinder) {
        (self.action)(binder)
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset").field("id", &self.id).field("label", &self.label).finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresetTableError {
    DuplicateId { id: String },
    DuplicateLabel { label: String },
}

impl fmt::Display for PresetTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetTableError::DuplicateId { id } => {
                write!(f, "DuplicateId: preset id '{}' registered twice", id)
            }
            PresetTableError::DuplicateLabel { label } => {
                write!(f, "DuplicateLabel: preset label '{}' registered twice", label)
            }
        }
    }
}

impl std::error::Error for PresetTableError {}

/// Ordered preset collection; insertion order is the rendered option
/// order, ids and labels are unique.
#[derive(Debug)]
pub struct PresetTable {
    entries: Vec<Preset>,
}

impl PresetTable {
    pub fn new(entries: Vec<Preset>) -> Result<PresetTable, PresetTableError> {
        for (i, entry) in entries.iter().enumerate() {
            for earlier in &entries[..i] {
                if earlier.id == entry.id {
                    return Err(PresetTableError::DuplicateId { id: entry.id.to_string() });
                }
                if earlier.label == entry.label {
                    return Err(PresetTableError::DuplicateLabel {
                        label: entry.label.to_string(),
                    });
                }
            }
        }
        Ok(PresetTable { entries })
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// -------------
//  SHARED
// -------------

/// Reloads the page, restoring the server-rendered defaults.
fn default_settings(_binder: &FormBinder) {
    let location = match dom::window_document() {
        Ok((window, _document)) => window.location(),
        Err(e) => {
            console::error_1(&format!("Cannot reload page: {}", e).into());
            return;
        }
    };
    if let Err(e) = location.reload() {
        console::error_1(&format!("Page reload failed: {:?}", e.as_string()).into());
    }
}

// -------------
//  BATCH-TAG
// -------------

/// Variable modifications the host preselects on a fresh page.
pub const DEFAULT_VAR_MODS: [&str; 7] = [
    "Acetyl (Protein N-term)",
    "Acetyl+Oxidation (Protein N-term M)",
    "Deamidated (N)",
    "Gln->pyro-Glu (N-term Q)",
    "Met-loss (Protein N-term M)",
    "Met-loss+Acetyl (Protein N-term M)",
    "Oxidation (M)",
];

/// Common digestion settings for a standard tryptic search.
fn tryptic_digest(binder: &FormBinder) {
    binder.set_grouped(
        "protease",
        &["enzyme", "nonSpecific", "missedCleavages"],
        &[Value::from("Trypsin"), Value::from("at 0 termini"), Value::from("2")],
    );
}

/// Standard MS/MS search: carbamidomethylated cysteines, the stock
/// variable mod list, two missed cleavages and at most two mods.
fn ms2_standard_search(binder: &FormBinder) {
    tryptic_digest(binder);
    binder.set_mods("mods", "constMods", &["Carbamidomethyl (C)"], None);
    binder.set_mods("mods", "varMods", &DEFAULT_VAR_MODS, None);
    binder.set_value("mods", "maxMods", &Value::from("2"));
}

/// SILAC search: the standard settings plus heavy-lysine labels kept as
/// variable mods, so light and heavy peptides match in one pass.
fn ms2_silac_search(binder: &FormBinder) {
    ms2_standard_search(binder);
    binder.set_mods("mods", "varMods", &["Label:13C(6)15N(2) (K)"], Some(false));
}

/// Cross-linking search: semi-specific cleavage opens up the linker
/// arms, with an extra missed cleavage allowed.
fn xlms_search(binder: &FormBinder) {
    binder.set_grouped(
        "protease",
        &["enzyme", "nonSpecific", "missedCleavages"],
        &[Value::from("Trypsin"), Value::from("at 1 termini"), Value::from("3")],
    );
    binder.set_mods("mods", "constMods", &["Carbamidomethyl (C)"], None);
    binder.set_mods("mods", "varMods", &DEFAULT_VAR_MODS, None);
    binder.set_value("mods", "maxMods", &Value::from("3"));
}

pub fn batch_tag_presets() -> Result<PresetTable, PresetTableError> {
    PresetTable::new(vec![
        Preset::new("default", "Default", default_settings),
        Preset::new("ms2-standard", "MS2 Standard", ms2_standard_search),
        Preset::new("ms2-silac", "MS2 SILAC 13C(6) 15N(2)", ms2_silac_search),
        Preset::new("xlms-standard", "XLMS Standard", xlms_search),
    ])
}

// -------------
//  SEARCH COMPARE
// -------------

const MS2_COLUMNS: [&str; 19] = [
    "mz", "charge", "error", "score", "eVal", "bestEv", "numInDb", "coverage", "bestDiscrScore",
    "dbPeptide", "time", "msmsInfo", "start", "number", "accession", "mw", "species", "name",
    "links",
];

const XLMS_COLUMNS: [&str; 11] = [
    "mz", "charge", "error", "score", "eVal", "dbPeptide", "time", "msmsInfo", "start",
    "accession", "name",
];

/// Turns off all quantitative aspects of the report.
fn no_quantitation(binder: &FormBinder) {
    binder.blank_quantitation();
}

/// Turns on quantitation for the given label and switches the report
/// to HTML, which the quantitation views require.
fn quantitation_search(binder: &FormBinder, label: &str) {
    binder.set_quantitation();
    binder.set_value("raw", "quantitation", &Value::from(label));
    binder.set_report_settings(&["format"], &[Value::from("HTML")]);
}

/// Minimal MS/MS report settings shared by the MS2 modes.
fn ms2_base_search(binder: &FormBinder) {
    binder.set_scores(
        &["proteinScore", "peptideScore", "proteinEv", "peptideEv"],
        &[Value::from("22.0"), Value::from("15.0"), Value::from("0.01"), Value::from("0.05")],
    );
    binder.set_report_settings(
        &["format", "report", "sort1", "sort2", "minBestDiscr", "replicates"],
        &[
            Value::from("Tab delimited text"),
            Value::from("Protein"),
            Value::from("Expectation Value"),
            Value::from(""),
            Value::from("0.0"),
            Value::from("Best Peptide Only"),
        ],
    );
}

fn ms2_standard_report(binder: &FormBinder) {
    ms2_base_search(binder);
    binder.blank_columns();
    binder.set_columns(&MS2_COLUMNS);
    binder.set_value("columns", "modReporting", &Value::from("All Mods (1 Column)"));
    no_quantitation(binder);
}

fn ms2_quantitation_report(binder: &FormBinder) {
    ms2_base_search(binder);
    quantitation_search(binder, "Label:13C 15N (K)");
}

/// Loose thresholds plus the false-positive report, for estimating the
/// false discovery rate of a finished search.
fn false_discovery_rate(binder: &FormBinder) {
    binder.set_scores(
        &["proteinScore", "peptideScore", "proteinEv", "peptideEv"],
        &[Value::from("10.0"), Value::from("10.0"), Value::from("10000.0"), Value::from("1.0")],
    );
    binder.set_report_settings(
        &["format", "report", "sort1", "sort2", "minBestDiscr", "replicates"],
        &[
            Value::from("HTML"),
            Value::from("False Positive Rate"),
            Value::from("Expectation Value"),
            Value::from(""),
            Value::from("-10.0"),
            Value::from("Keep Replicates"),
        ],
    );
    binder.blank_columns();
    binder.set_columns(&MS2_COLUMNS);
    binder.set_value("columns", "modReporting", &Value::from("All Mods (1 Column)"));
    no_quantitation(binder);
}

/// Minimal cross-linking report settings shared by the XLMS modes.
fn ms3_base_search(binder: &FormBinder) {
    binder.set_scores(
        &["proteinScore", "peptideScore", "proteinEv", "peptideEv"],
        &[Value::from("1.0"), Value::from("1.0"), Value::from("1.0"), Value::from("1.0")],
    );
    binder.set_report_settings(
        &["format", "report", "sort1", "sort2", "minBestDiscr", "replicates"],
        &[
            Value::from("Tab delimited text"),
            Value::from("Peptide"),
            Value::from("Expectation Value"),
            Value::from(""),
            Value::from("0.0"),
            Value::from("Keep Replicates"),
        ],
    );
}

fn xlms_standard_report(binder: &FormBinder) {
    ms3_base_search(binder);
    binder.blank_columns();
    binder.set_columns(&XLMS_COLUMNS);
    binder.set_value("columns", "modReporting", &Value::from("All Mods (1 Column)"));
    no_quantitation(binder);
}

/// Same export shape as the standard XLMS report; kept as its own entry
/// so downstream tooling can key on the label.
fn xlms_minimal_export(binder: &FormBinder) {
    ms3_base_search(binder);
    binder.blank_columns();
    binder.set_columns(&XLMS_COLUMNS);
    binder.set_value("columns", "modReporting", &Value::from("All Mods (1 Column)"));
    no_quantitation(binder);
}

pub fn search_compare_presets() -> Result<PresetTable, PresetTableError> {
    PresetTable::new(vec![
        Preset::new("default", "Default", default_settings),
        Preset::new("ms2-standard", "MS/MS -- Standard", ms2_standard_report),
        Preset::new("ms2-13c6-15n2", "MS/MS -- 13C(6) 15N(2) Quantitation", ms2_quantitation_report),
        Preset::new("xlms-standard", "XLMS -- Standard", xlms_standard_report),
        Preset::new("fdr", "False Discovery Rate", false_discovery_rate),
        Preset::new("xlms-minimal", "XLMS -- Minimal Export", xlms_minimal_export),
    ])
}
