//! MulLing: terminal dashboard for a multilingual information-retrieval
//! service.
//!
//! The heavy lifting (query construction, transport, result shaping and
//! request sequencing) lives in the `mulling-search` crate. This crate adds
//! what a dashboard needs around it:
//! - **Config**: TOML file with server and search-form defaults
//! - **Form**: explicit search form state turned into query requests
//! - **Dashboard**: form + client + results panel for one search view
//! - **Render**: plain-text views of results, errors and sandbox tools

pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod mulling_dirs;
pub mod render;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use form::SearchForm;
