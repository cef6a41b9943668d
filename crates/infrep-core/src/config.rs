use crate::app_config::{AppConfig, OutputFormat};
use crate::ConfigError;

/// Default upload-size guard: 25 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 25 * 1024 * 1024;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; tests drive this with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("'{raw}' is not a boolean")))
    };

    let log_level = or_default("INFREP_LOG_LEVEL", "info");
    let max_input_bytes = parse_u64(
        "INFREP_MAX_INPUT_BYTES",
        &DEFAULT_MAX_INPUT_BYTES.to_string(),
    )?;
    if max_input_bytes == 0 {
        return Err(invalid(
            "INFREP_MAX_INPUT_BYTES",
            "must be greater than zero".to_string(),
        ));
    }
    let cache_enabled = parse_bool("INFREP_CACHE_ENABLED", "true")?;
    let output_format = or_default("INFREP_OUTPUT_FORMAT", "table")
        .parse::<OutputFormat>()
        .map_err(|reason| invalid("INFREP_OUTPUT_FORMAT", reason))?;

    Ok(AppConfig {
        log_level,
        max_input_bytes,
        cache_enabled,
        output_format,
    })
}

/// Parse a boolean-ish flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
