//! Environment-driven configuration.
//!
//! Everything is read from the process environment so the binary drops into
//! a container or systemd unit without a config file. `load_from` takes the
//! lookup as a closure so tests never touch real environment variables.

use crate::CliError;
use remora_core::{DEFAULT_X_SEPARATION, DEFAULT_Y_SEPARATION};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub tripwire_url: String,
    pub tripwire_user: String,
    pub tripwire_password: String,
    pub tripwire_mask_id: String,
    pub wanderer_url: String,
    pub wanderer_api_key: String,
    pub wanderer_map_slug: String,
    pub home_system_id: i64,
    pub x_separation: f64,
    pub y_separation: f64,
    /// Zero means run once and exit.
    pub poll_interval_seconds: u64,
    pub dry_run: bool,
}

impl Config {
    pub fn load() -> Result<Config, CliError> {
        Self::load_from(|name| std::env::var(name).ok())
    }

    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, CliError> {
        Ok(Config {
            tripwire_url: required_url(&lookup, "TW_URL")?,
            tripwire_user: required(&lookup, "TW_USER")?,
            tripwire_password: required(&lookup, "TW_PASSWORD")?,
            tripwire_mask_id: required(&lookup, "TW_MASK_ID")?,
            wanderer_url: required_url(&lookup, "WANDERER_URL")?,
            wanderer_api_key: required(&lookup, "WANDERER_API_KEY")?,
            wanderer_map_slug: required(&lookup, "WANDERER_MAP_SLUG")?,
            home_system_id: required_positive_int(&lookup, "WANDERER_HOME_SYSTEM_ID")?,
            x_separation: optional_positive_number(
                &lookup,
                "POSITION_X_SEPARATION",
                DEFAULT_X_SEPARATION,
            )?,
            y_separation: optional_positive_number(
                &lookup,
                "POSITION_Y_SEPARATION",
                DEFAULT_Y_SEPARATION,
            )?,
            poll_interval_seconds: optional_seconds(&lookup, "POLL_INTERVAL_SECONDS")?,
            dry_run: flag(&lookup, "REMORA_DRY_RUN"),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, CliError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(CliError::Config(format!("{name} is required"))),
    }
}

fn required_url(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, CliError> {
    let value = required(lookup, name)?;
    let value = value.trim_end_matches('/').to_string();
    Url::parse(&value).map_err(|_| CliError::Config(format!("{name} must be a valid URL")))?;
    Ok(value)
}

fn required_positive_int(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<i64, CliError> {
    let value = required(lookup, name)?;
    let parsed: i64 = value
        .parse()
        .map_err(|_| CliError::Config(format!("{name} must be a valid integer")))?;
    if parsed <= 0 {
        return Err(CliError::Config(format!(
            "{name} must be positive, got {parsed}"
        )));
    }
    Ok(parsed)
}

/// Layout separations must be finite and above zero.
fn optional_positive_number(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
) -> Result<f64, CliError> {
    let parsed: f64 = match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| CliError::Config(format!("{name} must be a number")))?,
        _ => return Ok(default),
    };
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(CliError::Config(format!(
            "{name} must be positive, got {parsed}"
        )));
    }
    Ok(parsed)
}

fn optional_seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<u64, CliError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| CliError::Config(format!("{name} must be a non-negative integer"))),
        _ => Ok(0),
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> bool {
    lookup(name).is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    })
}
