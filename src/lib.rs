//! AutoHub - terminal record browser for the AutoHub admin console
//!
//! This library provides the record browser (filter, sort, page), the REST
//! client for the AutoHub backend, and the in-memory mock backend used by the
//! `autohub-mock-api` binary.

pub mod api;
pub mod auth;
pub mod badge;
pub mod browser;
pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod mock_api;
pub mod pager;
pub mod record;
pub mod render;
pub mod sort;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use browser::{BrowserProfile, RecordBrowser, View};
pub use cli::Args;
pub use error::{Error, Result};
pub use record::{Entity, Record};
