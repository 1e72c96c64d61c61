//! Application configuration.
//!
//! Loaded from `~/.autohub/config.toml` (or `--config <path>`), then
//! overridden by `AUTOHUB_API_URL` and `AUTOHUB_AUTH_FILE`.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//! timeout_secs = 10
//!
//! [auth]
//! file = "~/.autohub/auth.json"
//!
//! [paging]
//! car-users = 10
//! ```

use crate::error::Result;
use crate::record::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_API_URL: &str = "AUTOHUB_API_URL";
pub const ENV_AUTH_FILE: &str = "AUTOHUB_AUTH_FILE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Page size (or reveal step) overrides keyed by entity endpoint.
    #[serde(default)]
    pub paging: BTreeMap<String, usize>,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Path to the saved login (supports ~ expansion)
    #[serde(default = "default_auth_file")]
    pub file: String,
}

fn default_auth_file() -> String {
    "~/.autohub/auth.json".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            file: default_auth_file(),
        }
    }
}

impl AuthConfig {
    pub fn resolve_file(&self) -> PathBuf {
        expand_tilde(&self.file)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".autohub").join("config.toml"))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// An explicit path must exist; the default path may be missing, in
    /// which case built-in defaults are used. Env overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading config");
                    Self::from_toml(&std::fs::read_to_string(path)?)?
                }
                None => Self::default(),
            },
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
        if let Ok(file) = std::env::var(ENV_AUTH_FILE) {
            if !file.trim().is_empty() {
                self.auth.file = file.trim().to_string();
            }
        }
    }

    /// Configured page size for an entity, if overridden.
    pub fn page_size(&self, entity: Entity) -> Option<usize> {
        self.paging.get(entity.endpoint()).copied()
    }

    /// Every problem with the configuration, empty when it is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            problems.push(format!("api.base_url must be an http(s) URL, got '{}'", url));
        }
        if self.api.timeout_secs == 0 {
            problems.push("api.timeout_secs must be greater than 0".to_string());
        }
        if self.auth.file.trim().is_empty() {
            problems.push("auth.file must not be empty".to_string());
        }
        for (key, size) in &self.paging {
            if Entity::from_endpoint(key).is_none() {
                problems.push(format!("paging.{}: unknown entity", key));
            } else if *size == 0 {
                problems.push(format!("paging.{} must be greater than 0", key));
            }
        }
        problems
    }
}
