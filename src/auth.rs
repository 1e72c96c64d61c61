//! Persisted login state: the bearer token and who it belongs to.
//!
//! Stored as JSON at the configured auth file (default
//! `~/.autohub/auth.json`). Logging out deletes the file.

use crate::error::Result;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which console the user signs in to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Vendor,
    ServiceCenter,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Vendor => "vendor",
            Role::ServiceCenter => "service_center",
            Role::Admin => "admin",
        }
    }
}

/// Minimal identity kept alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Payload of a successful `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserIdentity,
}

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct AuthFile {
    token: String,
    user: UserIdentity,
}

/// A loaded login. The token stays wrapped until a request needs it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: UserIdentity,
}

pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nobody is logged in.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let file: AuthFile = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), user = %file.user.email, "loaded session");
        Ok(Some(Session {
            token: SecretString::from(file.token),
            user: file.user,
        }))
    }

    pub fn save(&self, token: &SecretString, user: &UserIdentity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = AuthFile {
            token: token.expose_secret().to_string(),
            user: user.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        restrict_permissions(&self.path)?;
        info!(user = %user.email, role = user.role.as_str(), "session saved");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!(path = %self.path.display(), "session cleared");
        Ok(true)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
