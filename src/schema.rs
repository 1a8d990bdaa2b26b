//! Field tables for the two host pages. Logical names group the
//! controls the way the forms present them; host names are the `name`
//! attributes the CGI pages render. Not every page renders every
//! control, and the binder tolerates the gaps.

use crate::binder::{Constant, FieldSpec};

/// Class of the header element naming the current form page.
pub const HEADER_CLASS: &str = "form_name";

/// Element type used for visual spacing around the injected picker.
pub const SPACER_TAG: &str = "br";

/// Insertion anchors for the injected picker, per page.
pub const BATCH_TAG_ANCHOR: &str = "parent_mass_convert";
pub const SEARCH_COMPARE_ANCHOR: &str = "save_format";

pub const BATCH_TAG_FIELDS: &[FieldSpec] = &[
    // Sequence database settings
    FieldSpec::new("database", "database", "database"),
    FieldSpec::new("database", "species", "species"),
    FieldSpec::new("database", "proteinSequence", "user_protein_sequence"),
    // Digestion settings
    FieldSpec::new("protease", "enzyme", "enzyme"),
    FieldSpec::new("protease", "nonSpecific", "allow_non_specific"),
    FieldSpec::new("protease", "missedCleavages", "missed_cleavages"),
    // Modification lists
    FieldSpec::new("mods", "constMods", "const_mod"),
    FieldSpec::new("mods", "varMods", "msms_mod_AA"),
    FieldSpec::new("mods", "maxMods", "msms_max_modifications"),
    // Mass tolerances
    FieldSpec::new("masses", "massConvert", "parent_mass_convert"),
    FieldSpec::new("masses", "parentTol", "msms_parent_mass_tolerance"),
    FieldSpec::new("masses", "parentTolUnits", "msms_parent_mass_tolerance_units"),
    FieldSpec::new("masses", "fragmentTol", "fragment_masses_tolerance"),
    FieldSpec::new("masses", "fragmentTolUnits", "fragment_masses_tolerance_units"),
    FieldSpec::new("masses", "chargeRange", "msms_precursor_charge_range"),
];

pub const SEARCH_COMPARE_FIELDS: &[FieldSpec] = &[
    // Report settings
    FieldSpec::new("report", "format", "save_format"),
    FieldSpec::new("report", "accessionNumbers", "accession_nums"),
    FieldSpec::new("report", "preferredSpecies", "preferred_species"),
    FieldSpec::new("report", "replicates", "peptide_filter"),
    FieldSpec::new("report", "remove", "remove"),
    FieldSpec::new("report", "multiSample", "multi_sample"),
    FieldSpec::new("report", "spotFraction", "id_filter_list"),
    FieldSpec::new("report", "bestDiscr", "best_disc_only"),
    FieldSpec::new("report", "discrGraph", "disc_score_graph"),
    FieldSpec::new("report", "report", "report_type"),
    FieldSpec::new("report", "sort1", "sort_type"),
    FieldSpec::new("report", "sort2", "sort_type_2"),
    FieldSpec::new("report", "reportHomologous", "report_homologous_proteins"),
    FieldSpec::new("report", "unmatchedSpectra", "unmatched_spectra"),
    FieldSpec::new("report", "saveSettings", "save_params"),
    FieldSpec::new("report", "maxPkFilter", "msms_pk_filter"),
    FieldSpec::new("report", "msmsMaxPeaks", "msms_max_peaks"),
    FieldSpec::new("report", "maxReportHits", "msms_max_reported_hits"),
    FieldSpec::new("report", "minBestDiscr", "min_best_disc_score_ESI_ION_TRAP_low_res"),
    // Protein and peptide scores
    FieldSpec::new("score", "proteinScore", "min_protein_score"),
    FieldSpec::new("score", "peptideScore", "min_peptide_score"),
    FieldSpec::new("score", "proteinEv", "max_protein_evalue"),
    FieldSpec::new("score", "peptideEv", "max_peptide_evalue"),
    // Raw data and quantitation settings
    FieldSpec::new("raw", "rawType", "raw_type"),
    FieldSpec::new("raw", "quantitation", "quan_type"),
    FieldSpec::new("raw", "median", "rep_q_median"),
    FieldSpec::new("raw", "iqr", "rep_q_iqr"),
    FieldSpec::new("raw", "mean", "rep_q_mean"),
    FieldSpec::new("raw", "meanVal", "rep_q_n_sdv"),
    FieldSpec::new("raw", "stdDev", "rep_q_stdev"),
    FieldSpec::new("raw", "num", "rep_q_num"),
    FieldSpec::new("raw", "intensity", "rep_intensity"),
    FieldSpec::new("raw", "intThreshold", "intensity_threshold"),
    FieldSpec::new("raw", "resolution", "rep_resolution"),
    FieldSpec::new("raw", "intCs", "rep_cs_intensity"),
    FieldSpec::new("raw", "lhInt", "rep_a_lh_int"),
    FieldSpec::new("raw", "area", "rep_area"),
    FieldSpec::new("raw", "csArea", "rep_cs_area"),
    FieldSpec::new("raw", "csThreshold", "area_threshold"),
    FieldSpec::new("raw", "lhArea", "rep_a_lh_area"),
    FieldSpec::new("raw", "snr", "rep_snr"),
    FieldSpec::new("raw", "snrThreshold", "snr_threshold"),
    FieldSpec::new("raw", "noiseMean", "rep_n_mean"),
    FieldSpec::new("raw", "noiseSd", "rep_n_stdev"),
    FieldSpec::new("raw", "rtIntMin", "rt_int_start"),
    FieldSpec::new("raw", "rtIntMax", "rt_int_end"),
    FieldSpec::new("raw", "resolutionVal", "resolution"),
    FieldSpec::new("raw", "13CPerct", "percent_C13"),
    FieldSpec::new("raw", "15NPerct", "percent_N15"),
    FieldSpec::new("raw", "18OPerct", "percent_O18"),
    FieldSpec::new("raw", "purityCorr", "purity_correction"),
    FieldSpec::new("raw", "ionWindow", "reporter_ion_window"),
    // Report columns
    FieldSpec::new("columns", "mH", "report_m_plus_h"),
    FieldSpec::new("columns", "mz", "report_m_over_z"),
    FieldSpec::new("columns", "charge", "report_charge"),
    FieldSpec::new("columns", "mHCalc", "report_m_plus_h_calc"),
    FieldSpec::new("columns", "mZCalc", "report_m_over_z_calc"),
    FieldSpec::new("columns", "intensity", "report_intensity"),
    FieldSpec::new("columns", "error", "report_error"),
    FieldSpec::new("columns", "unmatched", "report_unmatched"),
    FieldSpec::new("columns", "numPeaks", "report_num_pks"),
    FieldSpec::new("columns", "rank", "report_rank"),
    FieldSpec::new("columns", "searchNum", "report_search_number"),
    FieldSpec::new("columns", "score", "report_score"),
    FieldSpec::new("columns", "scoreDiff", "report_score_diff"),
    FieldSpec::new("columns", "eVal", "report_expectation"),
    FieldSpec::new("columns", "pVal", "report_p_value"),
    FieldSpec::new("columns", "logP", "report_nlog_p_value"),
    FieldSpec::new("columns", "precursorNum", "report_num_precursor"),
    FieldSpec::new("columns", "gradient", "report_gradient"),
    FieldSpec::new("columns", "offset", "report_offset"),
    FieldSpec::new("columns", "discrScore", "report_disc_score"),
    FieldSpec::new("columns", "numInDb", "report_repeats"),
    FieldSpec::new("columns", "protScore", "report_prot_score"),
    FieldSpec::new("columns", "numUnique", "report_num_unique"),
    FieldSpec::new("columns", "peptideCount", "report_peptide_count"),
    FieldSpec::new("columns", "bestPepScore", "report_best_score"),
    FieldSpec::new("columns", "bestEv", "report_best_expect"),
    FieldSpec::new("columns", "coverage", "report_coverage"),
    FieldSpec::new("columns", "bestDiscrScore", "report_best_disc_score"),
    FieldSpec::new("columns", "dbPeptide", "report_db_peptide"),
    FieldSpec::new("columns", "modReporting", "peptide_mod_type"),
    FieldSpec::new("columns", "proteinMods", "report_protein_mod"),
    FieldSpec::new("columns", "slipThres", "slip_threshold"),
    FieldSpec::new("columns", "massMods", "report_mass_mod"),
    FieldSpec::new("columns", "missedCleavages", "report_missed_cleavages"),
    FieldSpec::new("columns", "time", "report_time"),
    FieldSpec::new("columns", "msmsInfo", "report_msms_info"),
    FieldSpec::new("columns", "length", "report_length"),
    FieldSpec::new("columns", "composition", "report_composition"),
    FieldSpec::new("columns", "start", "report_start_aa"),
    FieldSpec::new("columns", "end", "report_end_aa"),
    FieldSpec::new("columns", "prevAA", "report_previous_aa"),
    FieldSpec::new("columns", "nextAA", "report_next_aa"),
    FieldSpec::new("columns", "number", "report_number"),
    FieldSpec::new("columns", "accession", "report_accession"),
    FieldSpec::new("columns", "uniprot", "report_uniprot_id"),
    FieldSpec::new("columns", "geneName", "report_gene_name"),
    FieldSpec::new("columns", "protLength", "report_prot_len"),
    FieldSpec::new("columns", "mw", "report_mw"),
    FieldSpec::new("columns", "pi", "report_pi"),
    FieldSpec::new("columns", "species", "report_species"),
    FieldSpec::new("columns", "name", "report_name"),
    FieldSpec::new("columns", "links", "report_links"),
    FieldSpec::new("columns", "checkboxes", "report_checkboxes"),
];

/// Batch-Tag values that hold for every search mode.
pub fn batch_tag_constants() -> Vec<Constant> {
    vec![
        Constant::new("masses", "massConvert", "monoisotopic"),
        Constant::new("masses", "parentTol", 20),
        Constant::new("masses", "parentTolUnits", "ppm"),
        Constant::new("masses", "fragmentTol", "0.6"),
        Constant::new("masses", "fragmentTolUnits", "Da"),
    ]
}

/// Search Compare values that never change between report modes and
/// therefore should never be toggled.
pub fn search_compare_constants() -> Vec<Constant> {
    vec![
        Constant::new("report", "spotFraction", ""),
        Constant::new("report", "multiSample", false),
        Constant::new("report", "remove", false),
        Constant::new("report", "reportHomologous", "Interesting"),
        Constant::new("report", "unmatchedSpectra", false),
        Constant::new("report", "saveSettings", false),
        Constant::new("report", "maxPkFilter", "Max MSMS Pks"),
        Constant::new("report", "msmsMaxPeaks", ""),
        Constant::new("report", "maxReportHits", ""),
        Constant::new("report", "bestDiscr", true),
        Constant::new("report", "discrGraph", true),
    ]
}
