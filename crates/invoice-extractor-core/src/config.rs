//! Resolved runtime configuration: file values, then environment, then defaults.

use std::time::Duration;

use thiserror::Error;

use crate::config_file::{ConfigFile, OpenAiConfig, ServerConfig};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found. Set it in the environment, a .env file or the config file.")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Fully resolved configuration used by the server.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Pages read per PDF; `0` reads every page.
    pub max_pages: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl Config {
    /// Fill in defaults. Fails if no non-empty API key was configured.
    pub fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let openai = file.openai.unwrap_or_default();
        let server = file.server.unwrap_or_default();

        let max_upload_mb = server.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "max_upload_mb".to_string(),
                value: max_upload_mb.to_string(),
            })?;

        let api_key = openai
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            model: openai.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: openai
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(openai.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            host: server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: server.port.unwrap_or(DEFAULT_PORT),
            max_upload_bytes,
            max_pages: server.max_pages.unwrap_or(0),
        })
    }
}

/// Overlay environment variables on top of a file config.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`. Empty values are ignored.
pub fn apply_env<F>(file: ConfigFile, lookup: F) -> Result<ConfigFile, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let openai = file.openai.unwrap_or_default();
    let server = file.server.unwrap_or_default();

    Ok(ConfigFile {
        openai: Some(OpenAiConfig {
            api_key: get("OPENAI_API_KEY").or(openai.api_key),
            model: get("OPENAI_MODEL").or(openai.model),
            base_url: get("OPENAI_BASE_URL").or(openai.base_url),
            timeout_secs: openai.timeout_secs,
        }),
        server: Some(ServerConfig {
            host: get("INVOICE_EXTRACTOR_HOST").or(server.host),
            port: parse_var(&get, "INVOICE_EXTRACTOR_PORT")?.or(server.port),
            max_upload_mb: parse_var(&get, "INVOICE_EXTRACTOR_MAX_UPLOAD_MB")?
                .or(server.max_upload_mb),
            max_pages: parse_var(&get, "INVOICE_EXTRACTOR_MAX_PAGES")?.or(server.max_pages),
        }),
    })
}

fn parse_var<T, F>(get: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
