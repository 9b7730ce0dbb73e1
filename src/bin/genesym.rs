use eframe::{NativeOptions, egui};
use genesym::{about, app};
use std::env;

fn main() -> eframe::Result<()> {
    about::configure_macos_process_name();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gene ID/Symbol Converter",
        options,
        Box::new(|_cc| Ok(Box::new(app::GeneSymApp::new()))),
    )
}
