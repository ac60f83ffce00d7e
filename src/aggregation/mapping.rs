//! Post-ingest department mapping summary.

use serde::{Deserialize, Serialize};

use crate::models::{DepartmentId, ExpenseRecord};

/// How source department labels were mapped onto one department id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMapping {
    /// The canonical department.
    pub department: DepartmentId,
    /// Number of records mapped to it.
    pub record_count: u32,
    /// Distinct source labels mapped to it, first-seen order.
    pub source_names: Vec<String>,
}

/// Summarizes the department mapping of a record set.
///
/// Departments without records are left out. Source labels are recovered
/// from each record's description.
pub fn department_mapping_summary(records: &[ExpenseRecord]) -> Vec<DepartmentMapping> {
    DepartmentId::ALL
        .into_iter()
        .filter_map(|department| {
            let mut summary = DepartmentMapping {
                department,
                record_count: 0,
                source_names: Vec::new(),
            };
            for record in records.iter().filter(|record| record.department == department) {
                summary.record_count += 1;
                if let Some(source) = record.source_department() {
                    if !summary.source_names.iter().any(|name| name == source) {
                        summary.source_names.push(source.to_string());
                    }
                }
            }
            (summary.record_count > 0).then_some(summary)
        })
        .collect()
}
