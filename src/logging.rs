//! Browser console output for the `log` facade, plus the diagnostic dump of
//! the analysis constants.

use crate::AnalysisConstants;
use log::{info, warn, Level};
use web_sys::console;

/// Route `log` records to the browser console. Safe to call more than once.
pub fn init(level: Level) {
    if console_log::init_with_level(level).is_err() {
        warn!("Console logger already installed");
    }
}

/// Text written to the log when a run is requested.
pub fn constants_report(constants: Option<&AnalysisConstants>) -> Result<String, String> {
    let Some(constants) = constants else {
        return Err("Run requested but no constants are loaded".to_string());
    };
    serde_json::to_string(constants)
        .map(|json| format!("Running with constants: {}", json))
        .map_err(|e| format!("Could not serialize constants: {}", e))
}

/// Write the current constants to the console, both as JSON text and as a
/// live object the developer tools can expand.
pub fn log_constants(constants: Option<&AnalysisConstants>) {
    match constants_report(constants) {
        Ok(line) => info!("{}", line),
        Err(line) => warn!("{}", line),
    }
    if let Some(value) = constants.and_then(|c| serde_wasm_bindgen::to_value(c).ok()) {
        console::log_1(&value);
    }
}
