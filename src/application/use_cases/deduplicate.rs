// ============================================================
// DEDUPLICATION ENGINE
// ============================================================
// Partition sheet rows into kept rows and a deleted-rows log,
// grouping by one column and resolving each group by content.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::cleanup::DedupOutcome;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// How a group of rows sharing one concrete grouping value is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDecision {
    /// Single row: nothing to compare against.
    KeepAll,
    /// Every row identical across all columns: keep the first, log the rest.
    KeepFirst,
    /// At least one row differs: log every row, keep none.
    DeleteAll,
}

/// Classify a group given its rows in original order.
pub fn classify_group(rows: &[&[String]]) -> GroupDecision {
    match rows.split_first() {
        None => GroupDecision::KeepAll,
        Some((_, [])) => GroupDecision::KeepAll,
        Some((first, rest)) => {
            if rest.iter().all(|row| row == first) {
                GroupDecision::KeepFirst
            } else {
                GroupDecision::DeleteAll
            }
        }
    }
}

/// Missing, empty and whitespace-only values never form a group.
fn is_blank_key(value: &str) -> bool {
    value.trim().is_empty()
}

/// Deduplicate `table` by the values of `group_column`.
///
/// Kept rows come back in original table order. Deleted rows are appended
/// group by group, groups visited in ascending key order, rows within a
/// group in original order.
pub fn deduplicate(table: &Table, group_column: &str) -> Result<DedupOutcome> {
    let key_idx = table
        .column_index(group_column)
        .ok_or_else(|| AppError::MissingColumn(group_column.to_string()))?;

    let rows = table.rows();
    let mut kept_indices: Vec<usize> = Vec::with_capacity(rows.len());
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let key = row[key_idx].as_str();
        if is_blank_key(key) {
            kept_indices.push(idx);
        } else {
            groups.entry(key).or_default().push(idx);
        }
    }

    let mut deleted_rows: Vec<Vec<String>> = Vec::new();

    for (key, members) in &groups {
        let group_rows: Vec<&[String]> = members.iter().map(|&idx| rows[idx].as_slice()).collect();

        match classify_group(&group_rows) {
            GroupDecision::KeepAll => kept_indices.extend(members.iter().copied()),
            GroupDecision::KeepFirst => {
                kept_indices.push(members[0]);
                deleted_rows.extend(members[1..].iter().map(|&idx| rows[idx].clone()));
                debug!(key = %key, removed = members.len() - 1, "Identical rows collapsed");
            }
            GroupDecision::DeleteAll => {
                deleted_rows.extend(members.iter().map(|&idx| rows[idx].clone()));
                debug!(key = %key, removed = members.len(), "Conflicting rows removed");
            }
        }
    }

    kept_indices.sort_unstable();
    let kept_rows: Vec<Vec<String>> = kept_indices.iter().map(|&idx| rows[idx].clone()).collect();

    let initial_count = rows.len();
    let final_count = kept_rows.len();

    Ok(DedupOutcome {
        kept: table.with_rows(kept_rows),
        deleted: table.with_rows(deleted_rows),
        initial_count,
        final_count,
    })
}
