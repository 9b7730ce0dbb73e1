//! Bidirectional gene ID/symbol lookups built from two-column mapping tables.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use lazy_static::lazy_static;
use regex::Regex;

use crate::genome_build::GenomeBuild;

lazy_static! {
    static ref VERSION_SUFFIX: Regex =
        Regex::new(r"\.\d+$").expect("Invalid version suffix pattern");
}

/// Remove one trailing `.<digits>` annotation revision, if present.
pub fn strip_version(accession: &str) -> String {
    VERSION_SUFFIX.replace(accession, "").into_owned()
}

/// Lookup tables built from `accession<TAB>symbol` rows.
///
/// The forward map is keyed on version-stripped accessions, the reverse map
/// keeps the original (possibly versioned) accession as its value. Duplicate
/// keys keep the first row that produced them.
#[derive(Clone, Debug, Default)]
pub struct GeneMapping {
    id_to_symbol: HashMap<String, String>,
    symbol_to_id: HashMap<String, String>,
    rows: usize,
}

impl GeneMapping {
    /// Parse mapping rows from headerless tab-separated text.
    ///
    /// Rows without a tab yield an empty symbol; blank lines are skipped.
    pub fn from_table_text(text: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut ret = Self::default();
        for record in rdr.records() {
            let record = record?;
            let accession = record.get(0).unwrap_or_default();
            let symbol = record.get(1).unwrap_or_default();
            ret.insert_pair(accession, symbol);
        }
        Ok(ret)
    }

    /// Load the table for one genome build: the runtime file if present,
    /// otherwise the builtin asset.
    pub fn load(build: GenomeBuild) -> Result<Self> {
        let override_path = build.runtime_table_path();
        if Path::new(&override_path).exists() {
            let text = std::fs::read_to_string(&override_path)
                .with_context(|| format!("Could not read mapping table {override_path}"))?;
            return Self::from_table_text(&text)
                .with_context(|| format!("Could not parse mapping table {override_path}"));
        }
        Self::from_table_text(build.builtin_table())
            .with_context(|| format!("Could not parse builtin table for {}", build.id()))
    }

    fn insert_pair(&mut self, accession: &str, symbol: &str) {
        if accession.is_empty() && symbol.is_empty() {
            return;
        }
        self.rows += 1;
        self.id_to_symbol
            .entry(strip_version(accession))
            .or_insert_with(|| symbol.to_string());
        if !symbol.is_empty() {
            self.symbol_to_id
                .entry(symbol.to_string())
                .or_insert_with(|| accession.to_string());
        }
    }

    /// Symbol for an accession id. The raw value is probed first, then the
    /// version-stripped form; keys are stripped accessions.
    pub fn symbol_for_id(&self, accession: &str) -> Option<&str> {
        if let Some(symbol) = self.id_to_symbol.get(accession) {
            return Some(symbol.as_str());
        }
        self.id_to_symbol
            .get(strip_version(accession).as_str())
            .map(String::as_str)
    }

    /// Original (possibly versioned) accession id for a symbol.
    pub fn id_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.symbol_to_id.get(symbol).map(String::as_str)
    }

    /// Number of mapping rows read, duplicates included.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_mapping() -> GeneMapping {
        GeneMapping::from_table_text("ENSG001.3\tTP53\nENSG002.1\tBRCA1\n").unwrap()
    }

    #[test]
    fn test_strip_version() {
        assert_eq!(strip_version("ENSG00000141510.19"), "ENSG00000141510");
        assert_eq!(strip_version("ENSG00000141510"), "ENSG00000141510");
        assert_eq!(strip_version("ENSG1.3.2"), "ENSG1.3");
        assert_eq!(strip_version(""), "");
    }

    #[test]
    fn test_forward_lookup_uses_stripped_keys() {
        let mapping = small_mapping();
        assert_eq!(mapping.symbol_for_id("ENSG001"), Some("TP53"));
        assert_eq!(mapping.symbol_for_id("ENSG001.3"), Some("TP53"));
        assert_eq!(mapping.symbol_for_id("ENSG001.99"), Some("TP53"));
        assert_eq!(mapping.symbol_for_id("ENSG999"), None);
    }

    #[test]
    fn test_reverse_lookup_keeps_versioned_id() {
        let mapping = small_mapping();
        assert_eq!(mapping.id_for_symbol("TP53"), Some("ENSG001.3"));
        assert_eq!(mapping.id_for_symbol("UNKNOWN"), None);
    }

    #[test]
    fn test_first_occurrence_wins_on_duplicates() {
        let mapping = GeneMapping::from_table_text(
            "ENSG001.3\tTP53\nENSG001.4\tCDKN1A\nENSG002.1\tTP53\n",
        )
        .unwrap();
        // ENSG001.4 strips to the same forward key as ENSG001.3
        assert_eq!(mapping.symbol_for_id("ENSG001"), Some("TP53"));
        // the second TP53 row does not displace the first
        assert_eq!(mapping.id_for_symbol("TP53"), Some("ENSG001.3"));
        assert_eq!(mapping.rows(), 3);
    }

    #[test]
    fn test_row_without_tab_gets_empty_symbol() {
        let mapping = GeneMapping::from_table_text("ENSG001.3\nENSG002.1\tBRCA1\n").unwrap();
        assert_eq!(mapping.symbol_for_id("ENSG001"), Some(""));
        assert_eq!(mapping.id_for_symbol("BRCA1"), Some("ENSG002.1"));
        assert_eq!(mapping.id_for_symbol(""), None);
    }

    #[test]
    fn test_raw_probe_precedes_stripped_probe() {
        // A doubly suffixed accession strips to a key that still carries a
        // suffix, so a raw probe of that key must hit before stripping.
        let mapping = GeneMapping::from_table_text("ENSG001.3.2\tTP53\n").unwrap();
        assert_eq!(mapping.symbol_for_id("ENSG001.3"), Some("TP53"));
        assert_eq!(mapping.symbol_for_id("ENSG001"), None);
    }

    #[test]
    fn test_round_trip_with_kept_version() {
        let mapping = small_mapping();
        let symbol = mapping.symbol_for_id("ENSG001.3").unwrap();
        assert_eq!(mapping.id_for_symbol(symbol), Some("ENSG001.3"));
    }

    #[test]
    fn test_builtin_tables_load() {
        for build in GenomeBuild::ALL {
            let mapping = GeneMapping::load(build).unwrap();
            assert!(mapping.rows() > 50);
        }

        let hg38 = GeneMapping::load(GenomeBuild::Hg38V43).unwrap();
        assert_eq!(hg38.symbol_for_id("ENSG00000141510"), Some("TP53"));
        assert_eq!(hg38.id_for_symbol("TP53"), Some("ENSG00000141510.19"));

        let mm10 = GeneMapping::load(GenomeBuild::Mm10V25).unwrap();
        assert_eq!(mm10.id_for_symbol("Trp53"), Some("ENSMUSG00000059552.14"));
    }
}
