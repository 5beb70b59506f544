use super::{load_settings_from, parse_revalidate, Settings};

use std::{collections::HashMap, fs, path::PathBuf};

use form_core::RevalidateOnChange;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("form.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("form.toml");
    fs::write(
        &path,
        "definitions = \"forms/contact.toml\"\nrevalidate_on_change = \"always\"\nlog_filter = \"debug\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(
        settings.definitions_path,
        Some(PathBuf::from("forms/contact.toml"))
    );
    assert_eq!(settings.revalidate_on_change, RevalidateOnChange::Always);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("form.toml");
    fs::write(&path, "definitions = \"from-file.toml\"\n").expect("write settings");

    let env: HashMap<&str, &str> = HashMap::from([
        ("FORM_DEFINITIONS", "from-env.toml"),
        ("APP__DEFINITIONS", "from-app-env.json"),
        ("APP__REVALIDATE_ON_CHANGE", "Always"),
        ("RUST_LOG", "info"),
    ]);
    let settings = load_settings_from(&path, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(
        settings.definitions_path,
        Some(PathBuf::from("from-app-env.json"))
    );
    assert_eq!(settings.revalidate_on_change, RevalidateOnChange::Always);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("form.toml");
    fs::write(&path, "definitions = [").expect("write settings");
    assert_eq!(load_settings_from(&path, no_env), Settings::default());
}

#[test]
fn revalidate_values_accept_dashes_and_case() {
    assert_eq!(parse_revalidate("after-error"), Some(RevalidateOnChange::AfterError));
    assert_eq!(parse_revalidate(" ALWAYS "), Some(RevalidateOnChange::Always));
    assert_eq!(parse_revalidate("sometimes"), None);
}
