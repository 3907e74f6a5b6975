// ============================================================
// EXPORT TRANSFORMER
// ============================================================
// Drop the excluded column, append a metadata trailer row, emit CSV

use tracing::debug;

use crate::domain::cleanup::ExportMetadata;
use crate::domain::error::Result;
use crate::domain::sheet_range::SheetLayout;
use crate::domain::table::Table;
use crate::infrastructure::csv::CsvWriter;

/// Build the trailer row for `table`'s header. Metadata whose column is
/// absent from the header is dropped rather than added as a new column.
pub fn trailer_row(table: &Table, layout: &SheetLayout, metadata: &ExportMetadata) -> Vec<String> {
    let mut trailer = vec![String::new(); table.header().len()];

    let assignments = [
        (&layout.territory_column, &metadata.territory),
        (&layout.round_robin_column, &metadata.round_robin_name),
        (&layout.custom_field_column, &metadata.custom_field),
    ];

    for (column, value) in assignments {
        match table.column_index(column) {
            Some(idx) => trailer[idx] = value.clone(),
            None => debug!(column = %column, "Trailer column absent, value dropped"),
        }
    }

    trailer
}

/// Apply the export transformation and serialize to CSV bytes.
pub fn build_export(table: &Table, layout: &SheetLayout, metadata: &ExportMetadata) -> Result<Vec<u8>> {
    let mut export = table.clone();

    if export.drop_column(&layout.excluded_column) {
        debug!(column = %layout.excluded_column, "Removed excluded column");
    }

    let trailer = trailer_row(&export, layout, metadata);
    export.push_row(trailer)?;

    debug!(columns = ?export.header(), rows = export.len(), "Export table assembled");

    CsvWriter::new().write_table(&export)
}
