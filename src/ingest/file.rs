//! Uploaded file dispatch and multi-file ingestion.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::UploadConfig;
use crate::error::{AuditError, AuditResult};

use super::parser::{ParseReport, RecordParser, SkippedRow};

/// An uploaded file: its name and decoded text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Original file name, used to pick the parse path.
    pub name: String,
    /// Text content of the file.
    pub content: String,
}

impl UploadedFile {
    /// Creates an uploaded file.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A skipped line, tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSkippedRow {
    /// Name of the file containing the line.
    pub file: String,
    /// The skipped line and reason.
    #[serde(flatten)]
    pub row: SkippedRow,
}

/// Combined result of ingesting several files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestReport {
    /// Records of every file, in request order.
    pub records: Vec<crate::models::ExpenseRecord>,
    /// Skipped lines of every file, in request order.
    pub skipped: Vec<FileSkippedRow>,
}

/// Parses one uploaded file according to its kind.
///
/// - `.csv` files are parsed directly.
/// - Spreadsheet files are parsed only if their content looks like
///   comma-separated text; otherwise [`AuditError::BinarySpreadsheet`].
/// - Anything else is tried as comma-separated text, and any failure
///   becomes [`AuditError::UnsupportedFile`].
pub fn parse_file(
    name: &str,
    content: &str,
    parser: &RecordParser,
    upload: &UploadConfig,
) -> AuditResult<ParseReport> {
    let lower = name.to_lowercase();

    let result = if lower.ends_with(".csv") {
        parser.parse_with_report(content)
    } else if upload.is_spreadsheet(name) {
        if !(content.contains(',') && content.contains('\n')) {
            warn!(file = name, "Spreadsheet content is not delimited text");
            return Err(AuditError::BinarySpreadsheet {
                file_name: name.to_string(),
            });
        }
        parser.parse_with_report(content)
    } else {
        parser.parse_with_report(content).map_err(|error| {
            warn!(file = name, error = %error, "Could not parse file of unknown type");
            AuditError::UnsupportedFile {
                file_name: name.to_string(),
            }
        })
    };

    let report = result?;
    info!(
        file = name,
        records = report.records.len(),
        skipped = report.skipped.len(),
        "Parsed uploaded file"
    );
    Ok(report)
}

/// Parses every file in order and concatenates the results.
///
/// Fails with [`AuditError::NoFiles`] on an empty list and otherwise with
/// the first file error encountered.
///
/// # Example
///
/// ```
/// use expense_audit::config::UploadConfig;
/// use expense_audit::ingest::{RecordParser, UploadedFile, ingest_files};
///
/// let header = "Employee Name,Employee ID,Department,Parent Expense Type,Expense Type,Amount";
/// let files = vec![
///     UploadedFile::new("march.csv", format!("{header}\nAlice,E1,IT,Hotel,Room,120")),
///     UploadedFile::new("april.csv", format!("{header}\nBob,E2,HR,Meals,Lunch,15")),
/// ];
/// let report = ingest_files(&files, &RecordParser::default(), &UploadConfig::default()).unwrap();
/// assert_eq!(report.records.len(), 2);
/// ```
pub fn ingest_files(
    files: &[UploadedFile],
    parser: &RecordParser,
    upload: &UploadConfig,
) -> AuditResult<IngestReport> {
    if files.is_empty() {
        return Err(AuditError::NoFiles);
    }

    let mut combined = IngestReport::default();
    for file in files {
        let report = parse_file(&file.name, &file.content, parser, upload)?;
        combined.records.extend(report.records);
        combined
            .skipped
            .extend(report.skipped.into_iter().map(|row| FileSkippedRow {
                file: file.name.clone(),
                row,
            }));
    }
    Ok(combined)
}
