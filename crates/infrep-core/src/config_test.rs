use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    assert!(cfg.cache_enabled);
    assert_eq!(cfg.output_format, OutputFormat::Table);
}

#[test]
fn build_app_config_log_level_override() {
    let mut map = HashMap::new();
    map.insert("INFREP_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn build_app_config_max_input_bytes_override() {
    let mut map = HashMap::new();
    map.insert("INFREP_MAX_INPUT_BYTES", "1024");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_input_bytes, 1024);
}

#[test]
fn build_app_config_max_input_bytes_invalid() {
    let mut map = HashMap::new();
    map.insert("INFREP_MAX_INPUT_BYTES", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFREP_MAX_INPUT_BYTES"),
        "expected InvalidEnvVar(INFREP_MAX_INPUT_BYTES), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_input_bytes_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("INFREP_MAX_INPUT_BYTES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFREP_MAX_INPUT_BYTES"),
        "expected InvalidEnvVar(INFREP_MAX_INPUT_BYTES), got: {result:?}"
    );
}

#[test]
fn build_app_config_cache_disabled() {
    for raw in ["false", "0", "no", "OFF"] {
        let mut map = HashMap::new();
        map.insert("INFREP_CACHE_ENABLED", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.cache_enabled, "expected cache disabled for {raw}");
    }
}

#[test]
fn build_app_config_cache_flag_invalid() {
    let mut map = HashMap::new();
    map.insert("INFREP_CACHE_ENABLED", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFREP_CACHE_ENABLED"),
        "expected InvalidEnvVar(INFREP_CACHE_ENABLED), got: {result:?}"
    );
}

#[test]
fn build_app_config_output_format_override() {
    let mut map = HashMap::new();
    map.insert("INFREP_OUTPUT_FORMAT", "json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_format, OutputFormat::Json);
}

#[test]
fn build_app_config_output_format_invalid() {
    let mut map = HashMap::new();
    map.insert("INFREP_OUTPUT_FORMAT", "pdf");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFREP_OUTPUT_FORMAT"),
        "expected InvalidEnvVar(INFREP_OUTPUT_FORMAT), got: {result:?}"
    );
}

#[test]
fn output_format_accepts_md_alias() {
    assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
}
