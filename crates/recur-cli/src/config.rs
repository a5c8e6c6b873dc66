use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::str::FromStr;

const CONFIG_FILE: &str = "recur.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// IANA timezone used for "today" and for converting wire date-times
    #[serde(default = "detect_system_timezone")]
    pub timezone: String,
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: detect_system_timezone(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("RECUR_"))
    }

    /// The configured timezone, validated against the IANA database.
    pub fn timezone(&self) -> Result<Tz, String> {
        validate_timezone(&self.timezone)
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Validates that a timezone string is a valid IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, String> {
    Tz::from_str(timezone).map_err(|_| {
        format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        )
    })
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
            let tz = tz.trim();
            if validate_timezone(tz).is_ok() {
                return tz.to_string();
            }
        }
    }

    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    "UTC".to_string()
}
