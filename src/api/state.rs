//! Application state for the expense audit API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AuditConfig;
use crate::ingest::RecordParser;

/// Shared application state.
///
/// Holds the immutable configuration and the record parser built from its
/// column rules.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AuditConfig>,
    parser: Arc<RecordParser>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration.
    pub fn new(config: AuditConfig) -> Self {
        let parser = RecordParser::new(config.columns().clone());
        Self {
            config: Arc::new(config),
            parser: Arc::new(parser),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Returns the record parser.
    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }
}
