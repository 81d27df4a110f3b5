//! TOML configuration with environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dns_console_api::ApiClientConfig;
use serde::Deserialize;

pub const API_URL_ENV: &str = "DNS_CONSOLE_API_URL";
pub const SESSION_ENV: &str = "DNS_CONSOLE_SESSION";
pub const LOG_ENV: &str = "DNS_CONSOLE_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Contents of `config.toml`.
///
/// ```toml
/// log = "info,dns_console_api=debug"
///
/// [api]
/// base_url = "https://dns.example.com/api"
/// session_token = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api: ApiClientConfig,
    /// `EnvFilter` directives; `RUST_LOG` still wins when set.
    pub log: Option<String>,
}

/// `<config dir>/dns-console/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dns-console").join("config.toml"))
}

impl CliConfig {
    /// Reads `explicit` if given, else the default file if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `DNS_CONSOLE_*` variables looked up through `var`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(SESSION_ENV) {
            self.api.session_token = Some(token);
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.log = Some(filter);
        }
        self
    }

    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
