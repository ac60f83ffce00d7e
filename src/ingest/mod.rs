//! Ingestion of uploaded expense exports.
//!
//! [`RecordParser`] turns delimited text into [`crate::models::ExpenseRecord`]s;
//! [`parse_file`] and [`ingest_files`] choose the parse path from the file
//! name and combine several uploads into one record sequence.

mod file;
mod parser;

pub use file::{FileSkippedRow, IngestReport, UploadedFile, ingest_files, parse_file};
pub use parser::{
    MIN_FIELDS, ParseReport, RecordParser, SkipReason, SkippedRow, is_violation_flag, parse_amount,
    parse_csv_content,
};
