//! Error types for the expense audit engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every batch-fatal condition in ingestion, configuration and the API.
//! Per-row problems are not errors; see [`crate::ingest::SkipReason`].

use thiserror::Error;

/// The main error type for the expense audit engine.
///
/// Parsing a batch either yields records or exactly one of these errors;
/// no partial batch is ever returned alongside an error.
///
/// # Example
///
/// ```
/// use expense_audit::error::AuditError;
///
/// let error = AuditError::MissingColumn {
///     column: "Employee ID".to_string(),
///     headers: vec!["name".to_string(), "dept".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Required column missing: Could not find Employee ID column. Found headers: name, dept"
/// );
/// ```
#[derive(Debug, Error)]
pub enum AuditError {
    /// The input had no header or no data lines.
    #[error(
        "CSV file appears to be empty or improperly formatted. Please check your file and try again."
    )]
    EmptyInput,

    /// A required logical column could not be located in the header row.
    #[error("Required column missing: Could not find {column} column. Found headers: {}", .headers.join(", "))]
    MissingColumn {
        /// Display label of the logical column that was not found.
        column: String,
        /// The normalized header tokens that were observed.
        headers: Vec<String>,
    },

    /// Every data line was skipped.
    #[error("No valid records found in the file. Please check the data format and try again.")]
    NoValidRecords,

    /// A file with a spreadsheet extension did not contain delimited text.
    #[error(
        "Binary Excel files require additional processing. Please save '{file_name}' as CSV format and upload again."
    )]
    BinarySpreadsheet {
        /// The name of the rejected file.
        file_name: String,
    },

    /// A file of unknown type could not be parsed as delimited text.
    #[error("Unsupported file type: {file_name}. Please upload CSV or Excel files.")]
    UnsupportedFile {
        /// The name of the rejected file.
        file_name: String,
    },

    /// An ingestion request carried no files.
    #[error("No files uploaded. Please select CSV or Excel files to process.")]
    NoFiles,

    /// A department filter did not name one of the known department ids.
    #[error("Unknown department id: {value}")]
    UnknownDepartment {
        /// The value that failed to parse.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or was incomplete.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl AuditError {
    /// Returns true for errors caused by the content of an uploaded batch.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AuditError::EmptyInput | AuditError::MissingColumn { .. } | AuditError::NoValidRecords
        )
    }
}

/// A type alias for Results that return AuditError.
pub type AuditResult<T> = Result<T, AuditError>;
