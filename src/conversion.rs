//! Column-wise ID/symbol conversion over a loaded table.

use anyhow::{Result, anyhow};

use crate::data_table::DataTable;
use crate::gene_mapping::{GeneMapping, strip_version};

/// Which way a column gets converted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    IdToSymbol,
    SymbolToId,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::IdToSymbol, Direction::SymbolToId];

    /// Stable identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::IdToSymbol => "id2sym",
            Self::SymbolToId => "sym2id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::IdToSymbol => "ID → Symbol",
            Self::SymbolToId => "Symbol → ID",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "id2sym" => Some(Self::IdToSymbol),
            "sym2id" => Some(Self::SymbolToId),
            _ => None,
        }
    }

    /// Name of the column the converted values land in.
    pub fn output_column(&self, source_column: &str) -> String {
        match self {
            Self::IdToSymbol => format!("{source_column}_symbol"),
            Self::SymbolToId => format!("{source_column}_ensembl"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConversionOptions {
    pub direction: Direction,
    /// Keep the `.<digits>` suffix on Symbol → ID results.
    pub keep_version: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            keep_version: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConversionOutcome {
    pub table: DataTable,
    pub output_column: String,
    pub cells_converted: usize,
}

/// Convert one cell. Unmapped and empty values pass through unchanged; this
/// never fails.
pub fn convert_cell(mapping: &GeneMapping, options: ConversionOptions, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match options.direction {
        Direction::IdToSymbol => mapping.symbol_for_id(value).unwrap_or(value).to_string(),
        Direction::SymbolToId => {
            let accession = mapping.id_for_symbol(value).unwrap_or(value);
            if options.keep_version {
                accession.to_string()
            } else {
                // The suffix is dropped from the result even when the lookup
                // missed and the input passed through.
                strip_version(accession)
            }
        }
    }
}

/// Convert `column` of `table` and place the result in the derived output
/// column. An existing column of that name is overwritten in place.
pub fn convert_column(
    table: &DataTable,
    column: &str,
    mapping: &GeneMapping,
    options: ConversionOptions,
) -> Result<ConversionOutcome> {
    let column_index = table
        .column_index(column)
        .ok_or_else(|| anyhow!("No column named '{column}' in the loaded table"))?;

    let mut cells_converted = 0usize;
    let mut converted = Vec::with_capacity(table.row_count());
    for row in table.rows() {
        let cell = row.get(column_index).map(String::as_str).unwrap_or_default();
        let value = convert_cell(mapping, options, cell);
        if value != cell {
            cells_converted += 1;
        }
        converted.push(value);
    }

    let output_column = options.direction.output_column(column);
    let mut out = table.clone();
    out.set_column(&output_column, converted);

    Ok(ConversionOutcome {
        table: out,
        output_column,
        cells_converted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> GeneMapping {
        GeneMapping::from_table_text("ENSG001.3\tTP53\nENSG002.1\tBRCA1\n").unwrap()
    }

    fn one_column_table(name: &str, values: &[&str]) -> DataTable {
        DataTable::new(
            vec![name.to_string()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
    }

    fn column_values(table: &DataTable, name: &str) -> Vec<String> {
        let idx = table.column_index(name).unwrap();
        table.rows().iter().map(|row| row[idx].clone()).collect()
    }

    fn options(direction: Direction, keep_version: bool) -> ConversionOptions {
        ConversionOptions {
            direction,
            keep_version,
        }
    }

    #[test]
    fn test_id_to_symbol_with_pass_through() {
        let table = one_column_table("gene", &["ENSG001.3", "ENSG999.1"]);
        let outcome = convert_column(
            &table,
            "gene",
            &mapping(),
            options(Direction::IdToSymbol, true),
        )
        .unwrap();

        assert_eq!(outcome.output_column, "gene_symbol");
        assert_eq!(
            outcome.table.headers(),
            &["gene".to_string(), "gene_symbol".to_string()]
        );
        assert_eq!(
            column_values(&outcome.table, "gene_symbol"),
            vec!["TP53", "ENSG999.1"]
        );
        assert_eq!(outcome.cells_converted, 1);
    }

    #[test]
    fn test_symbol_to_id_without_version() {
        let table = one_column_table("gene", &["TP53", "UNKNOWN"]);
        let outcome = convert_column(
            &table,
            "gene",
            &mapping(),
            options(Direction::SymbolToId, false),
        )
        .unwrap();

        assert_eq!(outcome.output_column, "gene_ensembl");
        assert_eq!(
            column_values(&outcome.table, "gene_ensembl"),
            vec!["ENSG001", "UNKNOWN"]
        );
    }

    #[test]
    fn test_symbol_to_id_with_version() {
        let table = one_column_table("gene", &["TP53", "UNKNOWN"]);
        let outcome = convert_column(
            &table,
            "gene",
            &mapping(),
            options(Direction::SymbolToId, true),
        )
        .unwrap();

        assert_eq!(
            column_values(&outcome.table, "gene_ensembl"),
            vec!["ENSG001.3", "UNKNOWN"]
        );
    }

    #[test]
    fn test_version_dropped_from_pass_through_values() {
        let mapping = mapping();
        assert_eq!(
            convert_cell(&mapping, options(Direction::SymbolToId, false), "FOO.1"),
            "FOO"
        );
        assert_eq!(
            convert_cell(&mapping, options(Direction::SymbolToId, true), "FOO.1"),
            "FOO.1"
        );
    }

    #[test]
    fn test_empty_cells_pass_through() {
        let table = one_column_table("gene", &["", "TP53"]);
        let outcome = convert_column(
            &table,
            "gene",
            &mapping(),
            options(Direction::SymbolToId, true),
        )
        .unwrap();

        assert_eq!(
            column_values(&outcome.table, "gene_ensembl"),
            vec!["", "ENSG001.3"]
        );
        assert_eq!(outcome.cells_converted, 1);
    }

    #[test]
    fn test_existing_output_column_is_overwritten() {
        let table = DataTable::new(
            vec!["gene".to_string(), "gene_symbol".to_string()],
            vec![vec!["ENSG001.3".to_string(), "stale".to_string()]],
        );
        let outcome = convert_column(
            &table,
            "gene",
            &mapping(),
            options(Direction::IdToSymbol, true),
        )
        .unwrap();

        assert_eq!(outcome.table.headers().len(), 2);
        assert_eq!(column_values(&outcome.table, "gene_symbol"), vec!["TP53"]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let table = one_column_table("gene", &["TP53"]);
        let err = convert_column(
            &table,
            "nope",
            &mapping(),
            ConversionOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_direction_ids_and_labels() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_id(direction.id()), Some(direction));
        }
        assert_eq!(Direction::from_id("both"), None);
        assert_eq!(Direction::IdToSymbol.output_column("g"), "g_symbol");
        assert_eq!(Direction::SymbolToId.output_column("g"), "g_ensembl");
    }
}
