//! eframe application state and widgets for the converter window.

use std::path::PathBuf;

use eframe::egui::{self, Checkbox, Color32, ComboBox, Ui};

use crate::conversion::{ConversionOptions, Direction, convert_column};
use crate::data_table::{DataTable, converted_output_path};
use crate::gene_mapping::GeneMapping;
use crate::genome_build::GenomeBuild;

const PREVIEW_ROWS: usize = 10;

#[derive(Default)]
pub struct GeneSymApp {
    input_path: Option<PathBuf>,
    table: Option<DataTable>,
    load_error: Option<String>,

    output_folder: Option<PathBuf>,

    genome_build: GenomeBuild,
    selected_column: Option<String>,
    direction: Direction,
    keep_version: bool,

    status: Option<String>,
    convert_error: Option<String>,
}

impl GeneSymApp {
    pub fn new() -> Self {
        Self {
            keep_version: true,
            ..Default::default()
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        self.status = None;
        self.convert_error = None;
        match DataTable::read_from_path(&path) {
            Ok(table) => {
                self.selected_column = table.headers().first().cloned();
                self.table = Some(table);
                self.load_error = None;
            }
            Err(e) => {
                self.table = None;
                self.selected_column = None;
                self.load_error = Some(format!("{e:#}"));
            }
        }
        self.input_path = Some(path);
    }

    fn run_conversion(&mut self) {
        self.status = None;
        self.convert_error = None;

        let (path, table) = match (&self.input_path, &self.table) {
            (Some(path), Some(table)) => (path.clone(), table.clone()),
            _ => {
                self.convert_error = Some("Please select a file first".to_string());
                return;
            }
        };
        let Some(column) = self.selected_column.clone() else {
            self.convert_error = Some("Please select a column to convert".to_string());
            return;
        };

        let mapping = match GeneMapping::load(self.genome_build) {
            Ok(mapping) => mapping,
            Err(e) => {
                self.convert_error = Some(format!("{e:#}"));
                return;
            }
        };

        let options = ConversionOptions {
            direction: self.direction,
            keep_version: self.keep_version,
        };
        let outcome = match convert_column(&table, &column, &mapping, options) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.convert_error = Some(format!("{e:#}"));
                return;
            }
        };

        let output_path = converted_output_path(&path, self.output_folder.as_deref());
        match outcome.table.write_to_path(&output_path) {
            Ok(()) => {
                self.status = Some(format!(
                    "Conversion completed, {} cells converted: {}",
                    outcome.cells_converted,
                    output_path.display()
                ));
            }
            Err(e) => self.convert_error = Some(format!("{e:#}")),
        }
    }

    fn render_file_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let label = self
                .input_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "No file selected".to_string());
            ui.label(label);
            if ui.button("Select File").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV/TSV Files", &["csv", "tsv", "txt"])
                    .pick_file()
                {
                    self.load_file(path);
                }
            }
        });
    }

    fn render_output_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let label = match &self.output_folder {
                Some(folder) => format!("Output folder: {}", folder.display()),
                None => "Output folder: (default: input file folder)".to_string(),
            };
            ui.label(label);
            if ui.button("Choose Folder").clicked() {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.output_folder = Some(folder);
                }
            }
        });
    }

    fn render_build_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Select Genome Build:");
            ComboBox::from_id_salt("genome_build")
                .selected_text(self.genome_build.label())
                .show_ui(ui, |ui| {
                    for build in GenomeBuild::ALL {
                        ui.selectable_value(&mut self.genome_build, build, build.label());
                    }
                });
        });
    }

    fn render_preview(&mut self, ui: &mut Ui) {
        let Some(table) = &self.table else {
            if let Some(err) = &self.load_error {
                ui.colored_label(Color32::RED, err);
            } else {
                ui.label("Load a file to preview its first rows.");
            }
            return;
        };

        egui::ScrollArea::both().max_height(240.0).show(ui, |ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .min_col_width(40.0)
                .show(ui, |ui| {
                    for header in table.headers() {
                        ui.strong(header.as_str());
                    }
                    ui.end_row();

                    for row in table.preview(PREVIEW_ROWS) {
                        for cell in row {
                            ui.label(cell.as_str());
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn render_conversion_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Select Column:");
            ComboBox::from_id_salt("source_column")
                .selected_text(self.selected_column.clone().unwrap_or_default())
                .show_ui(ui, |ui| {
                    if let Some(table) = &self.table {
                        for name in table.headers() {
                            ui.selectable_value(
                                &mut self.selected_column,
                                Some(name.clone()),
                                name.as_str(),
                            );
                        }
                    }
                });

            ui.label("Conversion Direction:");
            ComboBox::from_id_salt("direction")
                .selected_text(self.direction.label())
                .show_ui(ui, |ui| {
                    for direction in Direction::ALL {
                        ui.selectable_value(&mut self.direction, direction, direction.label());
                    }
                });
        });

        ui.add_enabled(
            self.direction == Direction::SymbolToId,
            Checkbox::new(
                &mut self.keep_version,
                "Keep version number (Symbol → ID only)",
            ),
        );

        if ui.button("Convert").clicked() {
            self.run_conversion();
        }
    }

    fn render_status(&mut self, ui: &mut Ui) {
        if let Some(err) = &self.convert_error {
            ui.colored_label(Color32::RED, err);
        } else if let Some(status) = &self.status {
            ui.label(status.as_str());
        } else {
            ui.label("Ready");
        }
    }
}

impl eframe::App for GeneSymApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show_inside(ui, |ui| {
            self.render_status(ui);
        });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            self.render_file_row(ui);
            self.render_output_row(ui);
            self.render_build_row(ui);
            ui.separator();
            self.render_preview(ui);
            ui.separator();
            self.render_conversion_controls(ui);
        });
    }
}
