// tests/integration_test.rs
//
// Drives the public session API against fixture renditions of the two
// host form pages. Each test builds its own page fragment under one
// positioned root and removes it afterwards, because controls are
// resolved document-wide by name.

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
              HtmlTextAreaElement};

use prospector_presets::dom::DomError;
use prospector_presets::inject::InjectError;
use prospector_presets::presets::DEFAULT_VAR_MODS;
use prospector_presets::session::{PageKind, Session, SessionError};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

struct PageFixture {
    root: Element,
}

impl PageFixture {
    /// Positioned root plus the form header naming the page.
    fn new(title: &str) -> PageFixture {
        let root = document().create_element("div").unwrap();
        root.set_attribute("style", "position: relative").unwrap();
        document().body().unwrap().append_child(&root).unwrap();

        let header = document().create_element("div").unwrap();
        header.set_class_name("form_name");
        header.set_text_content(Some(title));
        root.append_child(&header).unwrap();
        PageFixture { root }
    }

    fn add_select(&self, name: &str, option_values: &[&str], multiple: bool) -> HtmlSelectElement {
        let select: HtmlSelectElement =
            document().create_element("select").unwrap().dyn_into().unwrap();
        select.set_attribute("name", name).unwrap();
        if multiple {
            select.set_attribute("multiple", "multiple").unwrap();
        }
        for value in option_values {
            let option: HtmlOptionElement =
                document().create_element("option").unwrap().dyn_into().unwrap();
            option.set_value(value);
            option.set_text(value);
            select.append_child(&option).unwrap();
        }
        self.root.append_child(&select).unwrap();
        select
    }

    fn add_input(&self, name: &str, input_type: &str) -> HtmlInputElement {
        let input: HtmlInputElement =
            document().create_element("input").unwrap().dyn_into().unwrap();
        input.set_type(input_type);
        input.set_attribute("name", name).unwrap();
        self.root.append_child(&input).unwrap();
        input
    }

    fn add_textarea(&self, name: &str) -> HtmlTextAreaElement {
        let area: HtmlTextAreaElement =
            document().create_element("textarea").unwrap().dyn_into().unwrap();
        area.set_attribute("name", name).unwrap();
        self.root.append_child(&area).unwrap();
        area
    }

    fn picker_select(&self) -> HtmlSelectElement {
        self.root
            .query_selector("preset-options select")
            .unwrap()
            .expect("preset picker should be mounted")
            .dyn_into()
            .unwrap()
    }

    fn teardown(self) {
        self.root.remove();
    }
}

fn selected_values(select: &HtmlSelectElement) -> Vec<String> {
    let collection = select.options();
    let mut values = Vec::new();
    for i in 0..collection.length() {
        let option: HtmlOptionElement = collection.item(i).unwrap().dyn_into().unwrap();
        if option.selected() {
            values.push(option.value());
        }
    }
    values
}

struct BatchTagPage {
    fixture: PageFixture,
    parent_tol: HtmlInputElement,
    parent_tol_units: HtmlSelectElement,
    mass_convert: HtmlSelectElement,
    enzyme: HtmlSelectElement,
    missed_cleavages: HtmlSelectElement,
    const_mods: HtmlSelectElement,
    var_mods: HtmlSelectElement,
    max_mods: HtmlSelectElement,
}

fn batch_tag_page() -> BatchTagPage {
    let fixture = PageFixture::new("Batch-Tag Web");
    let mass_convert = fixture.add_select("parent_mass_convert", &["monoisotopic", "average"], false);
    let parent_tol = fixture.add_input("msms_parent_mass_tolerance", "text");
    let parent_tol_units = fixture.add_select("msms_parent_mass_tolerance_units", &["Da", "ppm"], false);
    fixture.add_input("fragment_masses_tolerance", "text");
    fixture.add_select("fragment_masses_tolerance_units", &["Da", "ppm", "mmu"], false);
    fixture.add_input("msms_precursor_charge_range", "text");
    let enzyme = fixture.add_select("enzyme", &["Trypsin", "Chymotrypsin", "No enzyme"], false);
    fixture.add_select(
        "allow_non_specific",
        &["at 0 termini", "at 1 termini", "at 2 termini"],
        false,
    );
    let missed_cleavages = fixture.add_select("missed_cleavages", &["0", "1", "2", "3"], false);

    let mut const_mod_options = vec!["Carbamidomethyl (C)", "Cys->Dha (C)"];
    const_mod_options.extend_from_slice(&DEFAULT_VAR_MODS);
    let const_mods = fixture.add_select("const_mod", &const_mod_options, true);

    let mut var_mod_options: Vec<&str> = DEFAULT_VAR_MODS.to_vec();
    var_mod_options.push("Label:13C(6)15N(2) (K)");
    var_mod_options.push("Phospho (STY)");
    let var_mods = fixture.add_select("msms_mod_AA", &var_mod_options, true);

    let max_mods = fixture.add_select("msms_max_modifications", &["1", "2", "3", "4"], false);
    fixture.add_select("database", &["SwissProt.2015.1", "NCBInr.2015.1"], true);
    fixture.add_select("species", &["All", "HUMAN", "ECOLI"], true);
    fixture.add_textarea("user_protein_sequence");

    BatchTagPage {
        fixture,
        parent_tol,
        parent_tol_units,
        mass_convert,
        enzyme,
        missed_cleavages,
        const_mods,
        var_mods,
        max_mods,
    }
}

#[wasm_bindgen_test]
fn test_batch_tag_attach_applies_baseline_and_mounts_picker() {
    let page = batch_tag_page();

    let session = Session::attach(&document()).expect("attach should succeed");
    assert_eq!(session.kind(), PageKind::BatchTag);
    assert!(session.is_mounted());

    // Baseline constants land before any preset runs.
    assert_eq!(selected_values(&page.mass_convert), vec!["monoisotopic"]);
    assert_eq!(page.parent_tol.value(), "20");
    assert_eq!(selected_values(&page.parent_tol_units), vec!["ppm"]);

    // Picker carries one option per preset, in table order, keyed by id.
    let picker = page.fixture.picker_select();
    assert_eq!(picker.options().length(), 4);
    let first: HtmlOptionElement = picker.options().item(0).unwrap().dyn_into().unwrap();
    assert_eq!(first.value(), "default");
    assert_eq!(first.text(), "Default");

    let json = session.snapshot_json().unwrap();
    assert!(json.contains("\"parentTolUnits\""));
    assert!(json.contains("\"monoisotopic\""));

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_ms2_standard_scenario() {
    let page = batch_tag_page();
    let session = Session::attach(&document()).unwrap();

    // Pre-select a stray mod to prove the preset blanks before marking.
    page.const_mods.set_value("Cys->Dha (C)");

    session.apply("ms2-standard").unwrap();

    assert_eq!(selected_values(&page.const_mods), vec!["Carbamidomethyl (C)"]);
    let var_selection = selected_values(&page.var_mods);
    assert_eq!(var_selection.len(), 7);
    for expected in DEFAULT_VAR_MODS {
        assert!(var_selection.iter().any(|v| v == expected), "missing var mod {}", expected);
    }
    assert_eq!(selected_values(&page.missed_cleavages), vec!["2"]);
    assert_eq!(selected_values(&page.max_mods), vec!["2"]);
    assert_eq!(selected_values(&page.enzyme), vec!["Trypsin"]);

    // Baseline fields the preset does not touch stay put.
    assert_eq!(selected_values(&page.parent_tol_units), vec!["ppm"]);
    assert_eq!(page.parent_tol.value(), "20");

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_presets_are_idempotent() {
    let page = batch_tag_page();
    let session = Session::attach(&document()).unwrap();

    session.apply("ms2-standard").unwrap();
    let first = session.binder().snapshot();
    session.apply("ms2-standard").unwrap();
    let second = session.binder().snapshot();
    assert_eq!(first, second, "Applying a preset twice must not change the result");

    // The SILAC preset layers the label on top of the standard settings
    // and is itself idempotent.
    session.apply("ms2-silac").unwrap();
    let silac_first = session.binder().snapshot();
    session.apply("ms2-silac").unwrap();
    assert_eq!(silac_first, session.binder().snapshot());
    let var_selection = selected_values(&page.var_mods);
    assert_eq!(var_selection.len(), 8);
    assert!(var_selection.iter().any(|v| v == "Label:13C(6)15N(2) (K)"));

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_picker_change_applies_selected_preset() {
    let page = batch_tag_page();
    let _session = Session::attach(&document()).unwrap();

    let picker = page.fixture.picker_select();
    picker.set_value("ms2-standard");
    picker.dispatch_event(&Event::new("change").unwrap()).unwrap();

    assert_eq!(selected_values(&page.const_mods), vec!["Carbamidomethyl (C)"]);
    assert_eq!(selected_values(&page.missed_cleavages), vec!["2"]);

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_unknown_preset_id_is_an_error() {
    let page = batch_tag_page();
    let session = Session::attach(&document()).unwrap();

    let result = session.apply("no-such-preset");
    assert_eq!(
        result.unwrap_err(),
        SessionError::UnknownPreset { id: "no-such-preset".to_string() }
    );

    page.fixture.teardown();
}

struct SearchComparePage {
    fixture: PageFixture,
    save_format: HtmlSelectElement,
    report_type: HtmlSelectElement,
    min_best_discr: HtmlInputElement,
    protein_score: HtmlInputElement,
    peptide_score: HtmlInputElement,
    protein_ev: HtmlInputElement,
    peptide_ev: HtmlInputElement,
    mod_reporting: HtmlSelectElement,
    m_plus_h: HtmlInputElement,
    m_over_z: HtmlInputElement,
    links: HtmlInputElement,
    raw_type: HtmlSelectElement,
    quan_type: HtmlSelectElement,
    q_mean: HtmlInputElement,
    best_discr: HtmlInputElement,
}

fn search_compare_page() -> SearchComparePage {
    let fixture = PageFixture::new("Search Compare");
    let save_format = fixture.add_select("save_format", &["HTML", "Tab delimited text"], false);
    let report_type =
        fixture.add_select("report_type", &["Protein", "Peptide", "False Positive Rate"], false);
    fixture.add_select("sort_type", &["Expectation Value", "Score"], false);
    fixture.add_select("sort_type_2", &["", "Score"], false);
    fixture.add_select("peptide_filter", &["Keep Replicates", "Best Peptide Only"], false);
    let min_best_discr = fixture.add_input("min_best_disc_score_ESI_ION_TRAP_low_res", "text");
    fixture.add_select("report_homologous_proteins", &["All", "Interesting"], false);
    fixture.add_select("msms_pk_filter", &["Unprocessed MSMS", "Max MSMS Pks"], false);
    fixture.add_input("msms_max_peaks", "text");
    fixture.add_input("msms_max_reported_hits", "text");
    fixture.add_input("id_filter_list", "text");
    fixture.add_input("multi_sample", "checkbox");
    fixture.add_input("remove", "checkbox");
    let best_discr = fixture.add_input("best_disc_only", "checkbox");
    fixture.add_input("disc_score_graph", "checkbox");

    let protein_score = fixture.add_input("min_protein_score", "text");
    let peptide_score = fixture.add_input("min_peptide_score", "text");
    let protein_ev = fixture.add_input("max_protein_evalue", "text");
    let peptide_ev = fixture.add_input("max_peptide_evalue", "text");

    // Report columns: the standard MS2 set plus one extra checkbox that
    // every report preset blanks away.
    let m_plus_h = fixture.add_input("report_m_plus_h", "checkbox");
    let m_over_z = fixture.add_input("report_m_over_z", "checkbox");
    for host in [
        "report_charge",
        "report_error",
        "report_score",
        "report_expectation",
        "report_best_expect",
        "report_repeats",
        "report_coverage",
        "report_best_disc_score",
        "report_db_peptide",
        "report_time",
        "report_msms_info",
        "report_start_aa",
        "report_number",
        "report_accession",
        "report_mw",
        "report_species",
        "report_name",
    ] {
        fixture.add_input(host, "checkbox");
    }
    let links = fixture.add_input("report_links", "checkbox");
    let mod_reporting =
        fixture.add_select("peptide_mod_type", &["Off", "All Mods (1 Column)"], false);

    let raw_type = fixture.add_select("raw_type", &["MS Precursor", "Quantitation"], false);
    let quan_type =
        fixture.add_select("quan_type", &["DTT_C 2H (C)", "Label:13C 15N (K)"], false);
    let q_mean = fixture.add_input("rep_q_mean", "checkbox");
    fixture.add_input("rep_q_n_sdv", "text");

    SearchComparePage {
        fixture,
        save_format,
        report_type,
        min_best_discr,
        protein_score,
        peptide_score,
        protein_ev,
        peptide_ev,
        mod_reporting,
        m_plus_h,
        m_over_z,
        links,
        raw_type,
        quan_type,
        q_mean,
        best_discr,
    }
}

// Most of the raw group is deliberately missing from this fixture: a
// page that renders only part of the schema must still attach and take
// presets without raising.
#[wasm_bindgen_test]
fn test_search_compare_fdr_scenario_with_partial_page() {
    let page = search_compare_page();

    let session = Session::attach(&document()).expect("attach should tolerate absent fields");
    assert_eq!(session.kind(), PageKind::SearchCompare);

    // Baseline constants from attach.
    assert!(page.best_discr.checked());

    // Make sure the preset overrides a dirty form, not just a fresh one.
    page.m_plus_h.set_checked(true);
    page.q_mean.set_checked(true);
    page.raw_type.set_value("Quantitation");

    session.apply("fdr").unwrap();

    assert_eq!(page.protein_score.value(), "10.0");
    assert_eq!(page.peptide_score.value(), "10.0");
    assert_eq!(page.protein_ev.value(), "10000.0");
    assert_eq!(page.peptide_ev.value(), "1.0");
    assert_eq!(selected_values(&page.save_format), vec!["HTML"]);
    assert_eq!(selected_values(&page.report_type), vec!["False Positive Rate"]);
    assert_eq!(page.min_best_discr.value(), "-10.0");

    // Columns were blanked, then the report set re-checked.
    assert!(!page.m_plus_h.checked(), "extra column must be blanked away");
    assert!(page.m_over_z.checked());
    assert!(page.links.checked());
    assert_eq!(selected_values(&page.mod_reporting), vec!["All Mods (1 Column)"]);

    // Quantitation was switched off and restored to its defaults.
    assert!(!page.q_mean.checked());
    assert_eq!(selected_values(&page.raw_type), vec!["MS Precursor"]);
    assert_eq!(selected_values(&page.quan_type), vec!["DTT_C 2H (C)"]);

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_search_compare_quantitation_preset() {
    let page = search_compare_page();
    let session = Session::attach(&document()).unwrap();

    session.apply("ms2-13c6-15n2").unwrap();

    assert_eq!(selected_values(&page.raw_type), vec!["Quantitation"]);
    assert_eq!(selected_values(&page.quan_type), vec!["Label:13C 15N (K)"]);
    assert!(page.q_mean.checked());
    // Quantitation views require the HTML report.
    assert_eq!(selected_values(&page.save_format), vec!["HTML"]);
    assert_eq!(page.protein_score.value(), "22.0");

    page.fixture.teardown();
}

#[wasm_bindgen_test]
fn test_missing_anchor_fails_attach() {
    // A recognizable header without the anchor control: the injector
    // must fail fast instead of mounting nowhere.
    let fixture = PageFixture::new("Search Compare");
    fixture.add_input("min_protein_score", "text");

    let result = Session::attach(&document());
    match result {
        Err(SessionError::Inject(InjectError::AnchorNotFound { name })) => {
            assert_eq!(name, "save_format");
        }
        Err(other) => panic!("Expected AnchorNotFound, got {}", other),
        Ok(_) => panic!("Attach must fail without the anchor control"),
    }

    fixture.teardown();
}

#[wasm_bindgen_test]
fn test_attach_rejects_unrelated_page() {
    let fixture = PageFixture::new("MS-Bridge");
    let result = Session::attach(&document());
    match result {
        Err(SessionError::UnknownPage { title }) => assert_eq!(title, "MS-Bridge"),
        Err(other) => panic!("Expected UnknownPage, got {}", other),
        Ok(_) => panic!("Attach must reject unrelated pages"),
    }
    fixture.teardown();

    // And with no header at all, the failure names the header class.
    let bare = Session::attach(&document());
    match bare {
        Err(SessionError::Dom(DomError::HeaderNotFound { class, .. })) => {
            assert_eq!(class, "form_name");
        }
        Err(other) => panic!("Expected HeaderNotFound, got {}", other),
        Ok(_) => panic!("Attach must fail without a header"),
    }
}
