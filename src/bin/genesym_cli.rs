use genesym::about;
use genesym::conversion::{ConversionOptions, Direction, convert_column};
use genesym::data_table::{DataTable, converted_output_path};
use genesym::gene_mapping::GeneMapping;
use genesym::genome_build::GenomeBuild;
use itertools::Itertools;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct BuildSummary {
    id: &'static str,
    label: &'static str,
    genes: usize,
}

#[derive(Serialize)]
struct ColumnsSummary {
    input: String,
    columns: Vec<String>,
}

#[derive(Serialize)]
struct ConvertSummary {
    input: String,
    output: String,
    build: &'static str,
    direction: &'static str,
    column: String,
    output_column: String,
    rows: usize,
    cells_converted: usize,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  genesym_cli --version\n  \
  genesym_cli builds\n  \
  genesym_cli columns --input FILE\n  \
  genesym_cli convert --input FILE --column NAME [--build hg38_v43|mm10_v25]\n           \
    [--direction id2sym|sym2id] [--keep-version] [--out-dir DIR]"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {flag}"))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    match args[0].as_str() {
        "builds" => cmd_builds(),
        "columns" => cmd_columns(&args[1..]),
        "convert" => cmd_convert(&args[1..]),
        other => {
            usage();
            Err(format!("Unknown command '{other}'"))
        }
    }
}

fn cmd_builds() -> Result<(), String> {
    let mut builds = Vec::new();
    for build in GenomeBuild::ALL {
        let mapping = GeneMapping::load(build).map_err(|e| format!("{e:#}"))?;
        builds.push(BuildSummary {
            id: build.id(),
            label: build.label(),
            genes: mapping.rows(),
        });
    }
    print_json(&builds)
}

fn cmd_columns(args: &[String]) -> Result<(), String> {
    let mut input: Option<PathBuf> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(PathBuf::from(next_value(args, i, "--input")?));
            }
            other => return Err(format!("Unknown argument '{other}'")),
        }
        i += 1;
    }
    let input = input.ok_or_else(|| "Missing --input".to_string())?;

    let table = DataTable::read_from_path(&input).map_err(|e| format!("{e:#}"))?;
    print_json(&ColumnsSummary {
        input: input.display().to_string(),
        columns: table.headers().to_vec(),
    })
}

fn cmd_convert(args: &[String]) -> Result<(), String> {
    let mut input: Option<PathBuf> = None;
    let mut column: Option<String> = None;
    let mut build = GenomeBuild::default();
    let mut direction = Direction::default();
    let mut keep_version = false;
    let mut out_dir: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(PathBuf::from(next_value(args, i, "--input")?));
            }
            "--column" => {
                i += 1;
                column = Some(next_value(args, i, "--column")?.to_string());
            }
            "--build" => {
                i += 1;
                let id = next_value(args, i, "--build")?;
                build = GenomeBuild::from_id(id)
                    .ok_or_else(|| format!("Unknown genome build '{id}' (use hg38_v43|mm10_v25)"))?;
            }
            "--direction" => {
                i += 1;
                let id = next_value(args, i, "--direction")?;
                direction = Direction::from_id(id)
                    .ok_or_else(|| format!("Unknown direction '{id}' (use id2sym|sym2id)"))?;
            }
            "--keep-version" => {
                keep_version = true;
            }
            "--out-dir" => {
                i += 1;
                out_dir = Some(PathBuf::from(next_value(args, i, "--out-dir")?));
            }
            other => return Err(format!("Unknown argument '{other}'")),
        }
        i += 1;
    }
    let input = input.ok_or_else(|| "Missing --input".to_string())?;
    let column = column.ok_or_else(|| "Missing --column".to_string())?;

    let table = DataTable::read_from_path(&input).map_err(|e| format!("{e:#}"))?;
    if table.column_index(&column).is_none() {
        return Err(format!(
            "No column named '{}'; available: {}",
            column,
            table.headers().iter().join(", ")
        ));
    }

    let mapping = GeneMapping::load(build).map_err(|e| format!("{e:#}"))?;
    let options = ConversionOptions {
        direction,
        keep_version,
    };
    let outcome = convert_column(&table, &column, &mapping, options).map_err(|e| format!("{e:#}"))?;

    let output_path = converted_output_path(&input, out_dir.as_deref());
    outcome
        .table
        .write_to_path(&output_path)
        .map_err(|e| format!("{e:#}"))?;

    print_json(&ConvertSummary {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        build: build.id(),
        direction: direction.id(),
        column,
        output_column: outcome.output_column,
        rows: outcome.table.row_count(),
        cells_converted: outcome.cells_converted,
    })
}
