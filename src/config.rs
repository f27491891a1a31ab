use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wellness Journey";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "wellness_journey_lib=debug,warn"
    } else {
        "wellness_journey_lib=info,warn"
    }
}

/// Get the application data directory
/// ~/WellnessJourney/ on all platforms. `None` when no home directory exists.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("WellnessJourney"))
}

/// Clinical threshold overrides (optional file)
pub fn thresholds_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("thresholds.json"))
}
