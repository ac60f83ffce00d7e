//! Configuration loading and management for the expense audit service.
//!
//! This module loads server, upload, review and column-resolver settings
//! from YAML files. [`AuditConfig::default`] mirrors the shipped
//! `config/default` directory, so the library works without any files.
//!
//! # Example
//!
//! ```no_run
//! use expense_audit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap().into_config();
//! println!("Pending reason: {}", config.review().pending_reason);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, AuditSettings, ColumnsFile, ReviewConfig, ServerConfig, UploadConfig};
