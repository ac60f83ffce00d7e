//! Configuration types for the audit service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! built-in default so a partial `audit.yaml` is accepted.

use serde::{Deserialize, Serialize};

use crate::classification::{ColumnRule, ColumnRules};

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Upload handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted request body size in bytes.
    pub max_bytes: usize,
    /// File extensions treated as spreadsheets, without the dot.
    pub spreadsheet_extensions: Vec<String>,
}

impl UploadConfig {
    /// Returns true if the file name ends in a configured spreadsheet
    /// extension, compared case-insensitively.
    pub fn is_spreadsheet(&self, file_name: &str) -> bool {
        file_extension(file_name).is_some_and(|ext| {
            self.spreadsheet_extensions
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            spreadsheet_extensions: vec!["xlsx".to_string(), "xls".to_string()],
        }
    }
}

/// Pending-review detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Lower-case keywords that mark a record description as pending review.
    pub pending_keywords: Vec<String>,
    /// Reason text attached to each pending-review entry.
    pub pending_reason: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            pending_keywords: ["pending", "review", "comment", "note"]
                .into_iter()
                .map(String::from)
                .collect(),
            pending_reason: "Pending Review".to_string(),
        }
    }
}

/// `audit.yaml` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Server section.
    pub server: ServerConfig,
    /// Upload section.
    pub upload: UploadConfig,
    /// Review section.
    pub review: ReviewConfig,
}

/// `columns.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsFile {
    /// The column resolver rules; validated into [`ColumnRules`] on load.
    pub rules: Vec<ColumnRule>,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditConfig {
    settings: AuditSettings,
    columns: ColumnRules,
}

impl AuditConfig {
    /// Creates a configuration from its parts.
    pub fn new(settings: AuditSettings, columns: ColumnRules) -> Self {
        Self { settings, columns }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.settings.server
    }

    /// Returns the upload settings.
    pub fn upload(&self) -> &UploadConfig {
        &self.settings.upload
    }

    /// Returns the pending-review settings.
    pub fn review(&self) -> &ReviewConfig {
        &self.settings.review
    }

    /// Returns the column resolver rule table.
    pub fn columns(&self) -> &ColumnRules {
        &self.columns
    }

    /// Overrides the bind address.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.settings.server.host = host;
        }
        if let Some(port) = port {
            self.settings.server.port = port;
        }
        self
    }
}

fn file_extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spreadsheet_extension_is_case_insensitive() {
        let upload = UploadConfig::default();
        assert!(upload.is_spreadsheet("report.xlsx"));
        assert!(upload.is_spreadsheet("REPORT.XLS"));
        assert!(!upload.is_spreadsheet("report.csv"));
        assert!(!upload.is_spreadsheet("xlsx"));
        assert!(!upload.is_spreadsheet(".xlsx"));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: AuditSettings = serde_yaml::from_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.review.pending_reason, "Pending Review");
        assert_eq!(settings.upload.spreadsheet_extensions, ["xlsx", "xls"]);
    }

    #[test]
    fn test_with_bind_overrides_only_given_values() {
        let config = AuditConfig::default().with_bind(None, Some(9000));
        assert_eq!(config.server().port, 9000);
        assert_eq!(config.server().host, "127.0.0.1");
    }
}
