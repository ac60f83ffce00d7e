//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the audit
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::classification::ColumnRules;
use crate::error::{AuditError, AuditResult};

use super::types::{AuditConfig, AuditSettings, ColumnsFile};

/// Loads the audit configuration from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── audit.yaml     # Server, upload and review settings
/// └── columns.yaml   # Column resolver rule table
/// ```
///
/// # Example
///
/// ```no_run
/// use expense_audit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Listening on port {}", loader.config().server().port);
/// # Ok::<(), expense_audit::error::AuditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AuditConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - either file is missing ([`AuditError::ConfigNotFound`])
    /// - either file contains invalid YAML ([`AuditError::ConfigParseError`])
    /// - the column rule table does not cover every logical column
    ///   ([`AuditError::ConfigParseError`])
    pub fn load<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<AuditSettings>(&path.join("audit.yaml"))?;

        let columns_path = path.join("columns.yaml");
        let columns_file = Self::load_yaml::<ColumnsFile>(&columns_path)?;
        let columns =
            ColumnRules::new(columns_file.rules).map_err(|message| AuditError::ConfigParseError {
                path: columns_path.display().to_string(),
                message,
            })?;

        tracing::debug!(path = %path.display(), "Loaded audit configuration");

        Ok(Self {
            config: AuditConfig::new(settings, columns),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AuditResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AuditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AuditError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AuditConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::LogicalColumn;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn temp_config_dir(name: &str, audit: &str, columns: Option<&str>) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "expense-audit-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("audit.yaml"), audit).unwrap();
        if let Some(columns) = columns {
            fs::write(dir.join("columns.yaml"), columns).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_shipped_config_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &AuditConfig::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(AuditError::ConfigNotFound { path }) => {
                assert!(path.contains("audit.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_columns_file_returns_error() {
        let dir = temp_config_dir("no-columns", "server:\n  port: 4000\n", None);
        match ConfigLoader::load(&dir) {
            Err(AuditError::ConfigNotFound { path }) => assert!(path.contains("columns.yaml")),
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = temp_config_dir("bad-yaml", "server: [unclosed", None);
        match ConfigLoader::load(&dir) {
            Err(AuditError::ConfigParseError { path, .. }) => assert!(path.contains("audit.yaml")),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_incomplete_rule_table_returns_parse_error() {
        let columns = "rules:\n  - column: employee_name\n    search_terms: [\"name\"]\n";
        let dir = temp_config_dir("incomplete", "{}\n", Some(columns));
        match ConfigLoader::load(&dir) {
            Err(AuditError::ConfigParseError { path, message }) => {
                assert!(path.contains("columns.yaml"));
                assert!(message.contains("Employee ID"));
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_custom_rule_terms_are_loaded() {
        let shipped = fs::read_to_string("./config/default/columns.yaml").unwrap();
        let custom = shipped.replace("\"employee name\"", "\"traveller\"");
        let dir = temp_config_dir("custom", "review:\n  pending_reason: Needs Review\n", Some(&custom));

        let config = ConfigLoader::load(&dir).unwrap().into_config();
        assert_eq!(config.columns().terms(LogicalColumn::EmployeeName)[0], "traveller");
        assert_eq!(config.review().pending_reason, "Needs Review");
        assert_eq!(config.server().port, 3000);
        fs::remove_dir_all(dir).unwrap();
    }
}
