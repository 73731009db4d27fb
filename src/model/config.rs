use serde::Deserialize;
use std::collections::HashMap;

/// Configuration from taskui.toml. Everything is optional; a missing file
/// means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Path to the task database (default: `taskui.db` in the working directory)
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    /// Color overrides under `[ui.colors]`, e.g. `accent = "#36B8FF"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
