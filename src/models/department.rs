//! Department identifier model.
//!
//! Source files carry arbitrary department names; every record is keyed by
//! one of seven canonical identifiers instead.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Prefix shared by every department identifier.
pub const DEPARTMENT_ID_PREFIX: &str = "DPTID";

/// One of the seven canonical department identifiers.
///
/// # Example
///
/// ```
/// use expense_audit::models::DepartmentId;
///
/// let dept: DepartmentId = "dptid3".parse().unwrap();
/// assert_eq!(dept, DepartmentId::Dept3);
/// assert_eq!(dept.as_str(), "DPTID3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DepartmentId {
    /// Engineering and technology.
    #[serde(rename = "DPTID1")]
    Dept1,
    /// Finance and accounting.
    #[serde(rename = "DPTID2")]
    Dept2,
    /// Marketing and sales.
    #[serde(rename = "DPTID3")]
    Dept3,
    /// Operations and manufacturing.
    #[serde(rename = "DPTID4")]
    Dept4,
    /// Human resources and administration.
    #[serde(rename = "DPTID5")]
    Dept5,
    /// Research and development.
    #[serde(rename = "DPTID6")]
    Dept6,
    /// Legal and compliance.
    #[serde(rename = "DPTID7")]
    Dept7,
}

impl DepartmentId {
    /// All identifiers in fixed-set order.
    pub const ALL: [DepartmentId; 7] = [
        DepartmentId::Dept1,
        DepartmentId::Dept2,
        DepartmentId::Dept3,
        DepartmentId::Dept4,
        DepartmentId::Dept5,
        DepartmentId::Dept6,
        DepartmentId::Dept7,
    ];

    /// Zero-based position in [`DepartmentId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            DepartmentId::Dept1 => 0,
            DepartmentId::Dept2 => 1,
            DepartmentId::Dept3 => 2,
            DepartmentId::Dept4 => 3,
            DepartmentId::Dept5 => 4,
            DepartmentId::Dept6 => 5,
            DepartmentId::Dept7 => 6,
        }
    }

    /// Returns the identifier at a zero-based position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The canonical identifier text, e.g. `DPTID4`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentId::Dept1 => "DPTID1",
            DepartmentId::Dept2 => "DPTID2",
            DepartmentId::Dept3 => "DPTID3",
            DepartmentId::Dept4 => "DPTID4",
            DepartmentId::Dept5 => "DPTID5",
            DepartmentId::Dept6 => "DPTID6",
            DepartmentId::Dept7 => "DPTID7",
        }
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepartmentId {
    type Err = AuditError;

    /// Parses an identifier case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|dept| dept.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AuditError::UnknownDepartment {
                value: s.to_string(),
            })
    }
}
