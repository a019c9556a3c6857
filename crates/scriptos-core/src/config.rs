use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, Language};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are optional here: each client reports its own missing key
/// when an operation that needs it runs.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values are treated as unset so `.env` templates can leave keys empty.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("SCRIPTOS_ENV", "development"))?;

    let bind_addr = or_default("SCRIPTOS_BIND_ADDR", "127.0.0.1:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SCRIPTOS_BIND_ADDR", e.to_string()))?;

    let language = or_default("SCRIPTOS_LANGUAGE", "en-us")
        .parse::<Language>()
        .map_err(|e| invalid("SCRIPTOS_LANGUAGE", e.to_string()))?;

    let http_timeout_secs = or_default("SCRIPTOS_HTTP_TIMEOUT_SECS", "60")
        .parse::<u64>()
        .map_err(|e| invalid("SCRIPTOS_HTTP_TIMEOUT_SECS", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level: or_default("SCRIPTOS_LOG_LEVEL", "info"),
        data_dir: PathBuf::from(or_default("SCRIPTOS_DATA_DIR", "./.scriptos")),
        language,
        gemini_api_key: optional("GEMINI_API_KEY"),
        gemini_model: or_default("SCRIPTOS_GEMINI_MODEL", "gemini-2.5-flash"),
        gemini_image_model: or_default("SCRIPTOS_GEMINI_IMAGE_MODEL", "gemini-2.5-flash-image"),
        youtube_api_key: optional("YOUTUBE_API_KEY"),
        youtube_access_token: optional("YOUTUBE_ACCESS_TOKEN"),
        http_timeout_secs,
        user_agent: or_default("SCRIPTOS_USER_AGENT", "scriptos/0.1 (content-studio)"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SCRIPTOS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
