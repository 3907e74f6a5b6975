use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{AppError, Result};

/// Column span covering every sheet this tool reads or clears.
pub const FULL_WIDTH_CELLS: &str = "A:ZZ";

/// Top-left cell; writes after a clear start here.
pub const ANCHOR_CELL: &str = "A1";

static A1_CELLS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+[0-9]*(:[A-Z]+[0-9]*)?$").unwrap());

/// An A1-notation range on a named sheet, rendered as `<sheet>!<cells>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    sheet: String,
    cells: String,
}

impl SheetRange {
    pub fn new(sheet: &str, cells: &str) -> Result<Self> {
        if sheet.trim().is_empty() || sheet.contains('!') {
            return Err(AppError::ValidationError(format!(
                "Invalid sheet name: {:?}",
                sheet
            )));
        }
        if !A1_CELLS_PATTERN.is_match(cells) {
            return Err(AppError::ValidationError(format!(
                "Invalid A1 cell reference: {:?}",
                cells
            )));
        }
        Ok(Self {
            sheet: sheet.to_string(),
            cells: cells.to_string(),
        })
    }

    pub fn full_width(sheet: &str) -> Result<Self> {
        Self::new(sheet, FULL_WIDTH_CELLS)
    }

    pub fn anchor(sheet: &str) -> Result<Self> {
        Self::new(sheet, ANCHOR_CELL)
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn a1(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.sheet, self.cells)
    }
}

/// Sheet and column names the cleanup and export workflows rely on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SheetLayout {
    pub data_sheet: String,
    pub log_sheet: String,
    pub group_column: String,
    pub excluded_column: String,
    pub territory_column: String,
    pub round_robin_column: String,
    pub custom_field_column: String,
    pub export_file_name: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            data_sheet: "Sheet1".to_string(),
            log_sheet: "Deleted Duplicates Log".to_string(),
            group_column: "Custom Field".to_string(),
            excluded_column: "Owner Name".to_string(),
            territory_column: "Territory".to_string(),
            round_robin_column: "Round Robin Name".to_string(),
            custom_field_column: "Custom Field".to_string(),
            export_file_name: "cleaned_data.csv".to_string(),
        }
    }
}
