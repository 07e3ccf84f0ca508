use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub openai: Option<OpenAiConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_upload_mb: Option<usize>,
    /// Pages read per PDF; `0` reads every page.
    pub max_pages: Option<usize>,
}

/// Platform config directory path: `<config_dir>/invoice-extractor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("invoice-extractor").join("config.toml"))
}

/// Load config by cascading CWD `.invoice-extractor.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".invoice-extractor.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_ai = base.openai.unwrap_or_default();
    let over_ai = overlay.openai.unwrap_or_default();
    let base_srv = base.server.unwrap_or_default();
    let over_srv = overlay.server.unwrap_or_default();

    ConfigFile {
        openai: Some(OpenAiConfig {
            api_key: over_ai.api_key.or(base_ai.api_key),
            model: over_ai.model.or(base_ai.model),
            base_url: over_ai.base_url.or(base_ai.base_url),
            timeout_secs: over_ai.timeout_secs.or(base_ai.timeout_secs),
        }),
        server: Some(ServerConfig {
            host: over_srv.host.or(base_srv.host),
            port: over_srv.port.or(base_srv.port),
            max_upload_mb: over_srv.max_upload_mb.or(base_srv.max_upload_mb),
            max_pages: over_srv.max_pages.or(base_srv.max_pages),
        }),
    }
}
