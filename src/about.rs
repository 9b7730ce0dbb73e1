pub fn version_cli_text() -> String {
    format!(
        "GeneSym {}\nGene ID/symbol converter for annotation tables",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(target_os = "macos")]
pub fn configure_macos_process_name() {
    use objc2_foundation::{NSProcessInfo, ns_string};
    // Winit builds the macOS app menu title from NSProcessInfo::processName.
    unsafe {
        NSProcessInfo::processInfo().setProcessName(ns_string!("GeneSym"));
    }
}

#[cfg(not(target_os = "macos"))]
pub fn configure_macos_process_name() {}
