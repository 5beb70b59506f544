use std::{
    env, fs,
    path::{Path, PathBuf},
};

use form_core::RevalidateOnChange;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "form.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub definitions_path: Option<PathBuf>,
    pub revalidate_on_change: RevalidateOnChange,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            definitions_path: None,
            revalidate_on_change: RevalidateOnChange::AfterError,
            log_filter: "warn".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    definitions: Option<PathBuf>,
    revalidate_on_change: Option<String>,
    log_filter: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings_from(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.definitions {
                settings.definitions_path = Some(v);
            }
            if let Some(v) = file_cfg.revalidate_on_change.as_deref().and_then(parse_revalidate) {
                settings.revalidate_on_change = v;
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
    }

    if let Some(v) = lookup("FORM_DEFINITIONS") {
        settings.definitions_path = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("APP__DEFINITIONS") {
        settings.definitions_path = Some(PathBuf::from(v));
    }

    if let Some(v) = lookup("APP__REVALIDATE_ON_CHANGE").as_deref().and_then(parse_revalidate) {
        settings.revalidate_on_change = v;
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

pub fn parse_revalidate(raw: &str) -> Option<RevalidateOnChange> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "after_error" => Some(RevalidateOnChange::AfterError),
        "always" => Some(RevalidateOnChange::Always),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
