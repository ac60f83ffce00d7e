//! Delimited-text record parsing.
//!
//! Turns the text of an expense export into normalized [`ExpenseRecord`]s.
//! The header is resolved once; every data line is then validated,
//! classified and mapped independently. Incomplete lines and lines with an
//! unusable amount are skipped without failing the batch; only structural
//! problems (no data, a missing required column, nothing left after
//! skipping) are errors.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classification::{
    ColumnIndices, ColumnRules, classify_category, map_department, normalize_header,
    resolve_columns,
};
use crate::error::{AuditError, AuditResult};
use crate::models::ExpenseRecord;

/// Minimum number of fields a data line must split into.
pub const MIN_FIELDS: usize = 5;

/// Why a data line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The line split into fewer than [`MIN_FIELDS`] fields.
    TooFewFields,
    /// One of the five required fields was empty or absent.
    MissingRequiredField,
    /// The amount column exists but the value is not a number.
    InvalidAmount,
    /// The amount parsed but was below zero.
    NegativeAmount,
    /// The tokenizer could not read the line.
    Unreadable,
}

/// A data line that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Data line ordinal; the header is line 0.
    pub line: usize,
    /// Why the line was dropped.
    pub reason: SkipReason,
}

/// Records from one batch together with the lines that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseReport {
    /// Records in source order.
    pub records: Vec<ExpenseRecord>,
    /// Skipped lines in source order.
    pub skipped: Vec<SkippedRow>,
}

/// Parses expense exports using a column rule table.
///
/// # Example
///
/// ```
/// use expense_audit::ingest::RecordParser;
/// use expense_audit::models::{Category, DepartmentId};
/// use chrono::NaiveDate;
///
/// let parser = RecordParser::default()
///     .with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// let records = parser
///     .parse("Employee Name,Employee ID,Department,Parent Expense Type,Expense Type\n\
///             Dana,E7,Legal,Meals,Dinner")
///     .unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].category, Category::Meals);
/// assert_eq!(records[0].department, DepartmentId::Dept7);
/// assert_eq!(records[0].date, "2024-06-01");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    rules: ColumnRules,
    today: Option<NaiveDate>,
}

impl RecordParser {
    /// Creates a parser with the given column rule table.
    pub fn new(rules: ColumnRules) -> Self {
        Self { rules, today: None }
    }

    /// Fixes the date used for lines without one.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The column rule table in use.
    pub fn rules(&self) -> &ColumnRules {
        &self.rules
    }

    /// Parses a batch, discarding skip diagnostics.
    pub fn parse(&self, content: &str) -> AuditResult<Vec<ExpenseRecord>> {
        self.parse_with_report(content).map(|report| report.records)
    }

    /// Parses a batch and reports which lines were skipped.
    ///
    /// # Errors
    ///
    /// - [`AuditError::EmptyInput`] if there is no header or no data line
    /// - [`AuditError::MissingColumn`] if a required column cannot be resolved
    /// - [`AuditError::NoValidRecords`] if every data line was skipped
    pub fn parse_with_report(&self, content: &str) -> AuditResult<ParseReport> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.len() < 2 {
            return Err(AuditError::EmptyInput);
        }

        let mut builder = ReaderBuilder::new();
        builder.has_headers(false).flexible(true).trim(Trim::All);

        let headers: Vec<String> = match tokenize_line(&builder, lines[0]) {
            Ok(record) => record.iter().map(normalize_header).collect(),
            Err(_) => lines[0].split(',').map(normalize_header).collect(),
        };
        let columns = resolve_columns(&headers, &self.rules)?;
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());

        let mut report = ParseReport::default();
        for (offset, text) in lines[1..].iter().enumerate() {
            let line = offset + 1;
            let outcome = tokenize_line(&builder, text)
                .and_then(|row| build_record(line, &row, &columns, today));
            match outcome {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    debug!(line, reason = ?reason, "Skipping expense line");
                    report.skipped.push(SkippedRow { line, reason });
                }
            }
        }

        if report.records.is_empty() {
            return Err(AuditError::NoValidRecords);
        }

        info!(
            records = report.records.len(),
            skipped = report.skipped.len(),
            "Parsed expense batch"
        );
        Ok(report)
    }
}

/// Parses a batch with the built-in column rules and today's date.
pub fn parse_csv_content(content: &str) -> AuditResult<Vec<ExpenseRecord>> {
    RecordParser::default().parse(content)
}

/// Parses an amount field.
///
/// Currency symbols, thousands separators and whitespace are removed before
/// parsing. Returns `None` if nothing numeric remains.
///
/// # Example
///
/// ```
/// use expense_audit::ingest::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("$1,234.50"), Some(Decimal::new(123450, 2)));
/// assert_eq!(parse_amount("n/a"), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Interprets a violation flag field.
///
/// True if the lower-cased text contains "yes", "true" or "violation", or
/// if the trimmed text is exactly "1".
pub fn is_violation_flag(raw: &str) -> bool {
    let text = raw.trim();
    let lower = text.to_lowercase();
    lower.contains("yes") || lower.contains("true") || text == "1" || lower.contains("violation")
}

/// Tokenizes one source line on its own, so a stray quote cannot run into
/// the following lines. A line with an unterminated quoted field is
/// unreadable.
fn tokenize_line(builder: &ReaderBuilder, line: &str) -> Result<StringRecord, SkipReason> {
    if line.matches('"').count() % 2 != 0 {
        return Err(SkipReason::Unreadable);
    }
    let mut reader = builder.from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record),
        Ok(false) | Err(_) => Err(SkipReason::Unreadable),
    }
}

fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

fn build_record(
    line: usize,
    row: &StringRecord,
    columns: &ColumnIndices,
    today: NaiveDate,
) -> Result<ExpenseRecord, SkipReason> {
    let fields: Vec<String> = row.iter().map(clean_field).collect();
    if fields.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields);
    }
    let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("");

    let employee_name = field(columns.employee_name);
    let employee_id = field(columns.employee_id);
    let department = field(columns.department);
    let parent_expense_type = field(columns.parent_expense_type);
    let expense_type = field(columns.expense_type);
    if [
        employee_name,
        employee_id,
        department,
        parent_expense_type,
        expense_type,
    ]
    .iter()
    .any(|value| value.is_empty())
    {
        return Err(SkipReason::MissingRequiredField);
    }

    let category = classify_category(parent_expense_type);

    let amount = match columns.amount {
        Some(index) => {
            let amount = parse_amount(field(index)).ok_or(SkipReason::InvalidAmount)?;
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(SkipReason::NegativeAmount);
            }
            amount
        }
        None => Decimal::ZERO,
    };

    let is_violation = columns
        .violation
        .map(|index| is_violation_flag(field(index)))
        .unwrap_or(false);

    let date = columns
        .date
        .map(field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

    Ok(ExpenseRecord {
        id: format!("{}-{}", line, category.as_str()),
        employee_name: employee_name.to_string(),
        department: map_department(department),
        category,
        amount,
        is_violation,
        date,
        description: ExpenseRecord::compose_description(
            parent_expense_type,
            expense_type,
            employee_name,
            department,
        ),
    })
}
