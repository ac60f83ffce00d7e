//! Classification logic for the expense audit engine.
//!
//! This module turns loosely-labelled source text into the engine's closed
//! sets: header tokens into logical column positions, expense type labels
//! into [`crate::models::Category`] values, and department names into
//! [`crate::models::DepartmentId`] values. None of these functions fail on
//! unrecognized text; each has a deterministic fallback.

mod category;
mod columns;
mod department;

pub use category::classify_category;
pub use columns::{
    ColumnIndices, ColumnRule, ColumnRules, LogicalColumn, find_column_index, normalize_header,
    resolve_columns,
};
pub(crate) use department::hash_bucket;
pub use department::{DEPARTMENT_DICTIONARY, map_department, string_hash};
