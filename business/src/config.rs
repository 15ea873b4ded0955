use std::env::vars;

use serde::Deserialize;
use thiserror::Error;

use crate::ErrorCorrection;
use crate::request::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE, is_selectable_size};

/// Prefix for every environment variable read by [`AppConfig::from_env`].
pub const ENV_PREFIX: &str = "QRGEN_";

pub const DEFAULT_SITE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(String),
    #[error("QRGEN_DEFAULT_SIZE={0} is not a selectable size")]
    InvalidSize(u32),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    site_url: Option<String>,
    default_size: Option<u32>,
    default_foreground: Option<String>,
    default_background: Option<String>,
    default_error_correction: Option<ErrorCorrection>,
}

/// Start-up settings: where the page is served and what the form starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub site_url: String,
    pub default_size: u32,
    pub default_foreground: String,
    pub default_background: String,
    pub default_error_correction: ErrorCorrection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_owned(),
            default_size: DEFAULT_SIZE,
            default_foreground: DEFAULT_FOREGROUND.to_owned(),
            default_background: DEFAULT_BACKGROUND.to_owned(),
            default_error_correction: ErrorCorrection::default(),
        }
    }
}

impl AppConfig {
    /// Read `QRGEN_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        log::info!("Loading configuration from environment variables");
        Self::from_vars(vars())
    }

    /// Build from arbitrary `(name, value)` pairs; names without the
    /// [`ENV_PREFIX`] are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig =
            serde_env::from_iter(scoped).map_err(|err| ConfigError::Env(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            site_url,
            default_size,
            default_foreground,
            default_background,
            default_error_correction,
        } = raw;

        let defaults = Self::default();

        let default_size = match default_size {
            Some(size) if is_selectable_size(size) => size,
            Some(size) => return Err(ConfigError::InvalidSize(size)),
            None => defaults.default_size,
        };

        let site_url = match site_url {
            Some(url) => {
                log::info!("Using provided QRGEN_SITE_URL: {url}");
                url.trim_end_matches('/').to_owned()
            }
            None => defaults.site_url,
        };

        Ok(Self {
            site_url,
            default_size,
            default_foreground: default_foreground.unwrap_or(defaults.default_foreground),
            default_background: default_background.unwrap_or(defaults.default_background),
            default_error_correction: default_error_correction
                .unwrap_or(defaults.default_error_correction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_vars(Vec::<(String, String)>::new())
            .expect("empty env should build");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = AppConfig::from_vars(vec![
            ("QRGEN_SITE_URL", "https://qr.example.com/"),
            ("QRGEN_DEFAULT_SIZE", "384"),
            ("QRGEN_DEFAULT_FOREGROUND", "#112233"),
            ("QRGEN_DEFAULT_ERROR_CORRECTION", "H"),
            ("PATH", "/usr/bin"),
        ])
        .expect("config should build");

        assert_eq!(config.site_url, "https://qr.example.com");
        assert_eq!(config.default_size, 384);
        assert_eq!(config.default_foreground, "#112233");
        assert_eq!(config.default_background, "#FFFFFF");
        assert_eq!(config.default_error_correction, ErrorCorrection::High);
    }

    #[test]
    fn off_step_size_is_rejected() {
        let result = AppConfig::from_vars(vec![("QRGEN_DEFAULT_SIZE", "300")]);
        assert!(matches!(result, Err(ConfigError::InvalidSize(300))));
    }

    #[test]
    fn unparsable_size_is_an_env_error() {
        let result = AppConfig::from_vars(vec![("QRGEN_DEFAULT_SIZE", "big")]);
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }
}
