//! Department name mapping.
//!
//! Maps arbitrary department labels onto the seven canonical
//! [`DepartmentId`] values: direct ids pass through, known names are looked
//! up exactly, then partially, and anything else is assigned by a fixed
//! 32-bit string hash so the same unknown name always lands on the same id.

use crate::models::DepartmentId;

/// Known department names in lookup order.
///
/// Order matters for partial matching: the first key contained in (or
/// containing) the input wins.
pub const DEPARTMENT_DICTIONARY: &[(&str, DepartmentId)] = &[
    // Engineering and technical
    ("ENGINEERING", DepartmentId::Dept1),
    ("COMPUTER SCIENCE", DepartmentId::Dept1),
    ("SOFTWARE ENGINEERING", DepartmentId::Dept1),
    ("IT", DepartmentId::Dept1),
    ("INFORMATION TECHNOLOGY", DepartmentId::Dept1),
    ("TECHNOLOGY", DepartmentId::Dept1),
    // Finance and accounting
    ("FINANCE", DepartmentId::Dept2),
    ("ACCOUNTING", DepartmentId::Dept2),
    ("FINANCIAL SERVICES", DepartmentId::Dept2),
    ("TREASURY", DepartmentId::Dept2),
    ("AUDIT", DepartmentId::Dept2),
    // Marketing and sales
    ("MARKETING", DepartmentId::Dept3),
    ("SALES", DepartmentId::Dept3),
    ("BUSINESS DEVELOPMENT", DepartmentId::Dept3),
    ("CUSTOMER SUCCESS", DepartmentId::Dept3),
    ("ADVERTISING", DepartmentId::Dept3),
    // Operations and manufacturing
    ("OPERATIONS", DepartmentId::Dept4),
    ("MANUFACTURING", DepartmentId::Dept4),
    ("PRODUCTION", DepartmentId::Dept4),
    ("SUPPLY CHAIN", DepartmentId::Dept4),
    ("LOGISTICS", DepartmentId::Dept4),
    // Human resources and admin
    ("HR", DepartmentId::Dept5),
    ("HUMAN RESOURCES", DepartmentId::Dept5),
    ("ADMINISTRATION", DepartmentId::Dept5),
    ("ADMIN", DepartmentId::Dept5),
    ("PEOPLE OPERATIONS", DepartmentId::Dept5),
    // Research and development
    ("RESEARCH AND DEVELOPMENT", DepartmentId::Dept6),
    ("R&D", DepartmentId::Dept6),
    ("RESEARCH", DepartmentId::Dept6),
    ("DEVELOPMENT", DepartmentId::Dept6),
    ("INNOVATION", DepartmentId::Dept6),
    // Legal and compliance
    ("LEGAL", DepartmentId::Dept7),
    ("COMPLIANCE", DepartmentId::Dept7),
    ("RISK MANAGEMENT", DepartmentId::Dept7),
    ("GOVERNANCE", DepartmentId::Dept7),
    ("REGULATORY AFFAIRS", DepartmentId::Dept7),
];

/// 32-bit multiply-add string hash over UTF-16 code units.
///
/// Computes `hash = hash * 31 + unit` with `i32` wraparound. The exact
/// arithmetic is fixed so assignments stay reproducible everywhere the
/// mapping is reimplemented.
///
/// # Example
///
/// ```
/// use expense_audit::classification::string_hash;
///
/// assert_eq!(string_hash(""), 0);
/// assert_eq!(string_hash("a"), 97);
/// assert_eq!(string_hash("ab"), 97 * 31 + 98);
/// ```
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Reduces a hash to a bucket in `0..buckets` using its absolute value.
pub(crate) fn hash_bucket(hash: i32, buckets: u32) -> u32 {
    (i64::from(hash).unsigned_abs() % u64::from(buckets)) as u32
}

/// Maps a raw department label to a canonical id.
///
/// Steps, in order:
/// 1. upper-case and trim; text that already parses as an id passes through;
/// 2. exact lookup in [`DEPARTMENT_DICTIONARY`];
/// 3. partial match, where the text contains a key or a key contains the text;
/// 4. [`string_hash`] of the normalized text, `|hash| mod 7`.
///
/// Never fails and never returns an out-of-set value.
///
/// # Example
///
/// ```
/// use expense_audit::classification::map_department;
/// use expense_audit::models::DepartmentId;
///
/// assert_eq!(map_department("Engineering"), DepartmentId::Dept1);
/// assert_eq!(map_department("dptid6"), DepartmentId::Dept6);
/// assert_eq!(map_department("Global Finance Team"), DepartmentId::Dept2);
/// assert_eq!(map_department("Zoology"), map_department("zoology "));
/// ```
pub fn map_department(raw: &str) -> DepartmentId {
    let normalized = raw.trim().to_uppercase();

    if let Ok(direct) = normalized.parse::<DepartmentId>() {
        return direct;
    }

    if let Some((_, id)) = DEPARTMENT_DICTIONARY
        .iter()
        .find(|(key, _)| *key == normalized)
    {
        return *id;
    }

    if let Some((_, id)) = DEPARTMENT_DICTIONARY
        .iter()
        .find(|(key, _)| normalized.contains(key) || key.contains(normalized.as_str()))
    {
        return *id;
    }

    let bucket = hash_bucket(string_hash(&normalized), DepartmentId::ALL.len() as u32);
    DepartmentId::from_index(bucket as usize).unwrap_or(DepartmentId::Dept1)
}
