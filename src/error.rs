//! Error type shared by the browser, the REST client and the config layer.

use crate::validation::FieldErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The backend answered with `success: false`.
    #[error("{0}")]
    Api(String),

    /// The backend answered `success: true` without a payload.
    #[error("response for {0} carried no data")]
    MissingData(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("unknown filter field '{field}' for {entity}")]
    UnknownFilter { entity: &'static str, field: String },

    #[error("unknown bucket '{label}' for field '{field}'")]
    UnknownBucket { field: String, label: String },

    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("page {page} is out of range (1..={last})")]
    PageOutOfRange { page: usize, last: usize },

    #[error("record {0} not found")]
    NotFound(u64),

    #[error("record {0} already exists")]
    DuplicateId(u64),

    #[error("{0} records do not support status toggling")]
    NotToggleable(&'static str),

    /// The row does not currently offer this action, e.g. Enable on an
    /// active record.
    #[error("{action} is not available for record {id}")]
    ActionNotOffered { id: u64, action: &'static str },

    #[error("{0} cannot be added from the console")]
    NotCreatable(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("terminal input failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("not logged in; run `autohub login` first")]
    NotAuthenticated,
}
