// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Table -> delimited text; the parser reads exports back in tests

#[cfg(test)]
mod csv_parser;
mod csv_writer;

#[cfg(test)]
pub use csv_parser::CsvParser;
pub use csv_writer::CsvWriter;
