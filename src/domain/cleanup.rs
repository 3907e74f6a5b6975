use serde::{Deserialize, Serialize};

use super::table::Table;

/// Result of partitioning a table into kept rows and the deleted-rows log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    pub kept: Table,
    pub deleted: Table,
    pub initial_count: usize,
    pub final_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupReport {
    pub initial_row_count: usize,
    pub final_row_count: usize,
    pub duplicates_removed: usize,
}

impl From<&DedupOutcome> for CleanupReport {
    fn from(outcome: &DedupOutcome) -> Self {
        Self {
            initial_row_count: outcome.initial_count,
            final_row_count: outcome.final_count,
            duplicates_removed: outcome.initial_count - outcome.final_count,
        }
    }
}

/// Operator-supplied values written into the export trailer row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportMetadata {
    pub territory: String,
    pub round_robin_name: String,
    pub custom_field: String,
}
