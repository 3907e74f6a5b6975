// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited text back into a Table

use csv::{ReaderBuilder, Trim};
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// CSV parser producing a rectangular table
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse CSV content; the first record is the header
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .has_headers(false)
            .flexible(true) // Short rows are padded by Table
            .from_reader(content.as_bytes());

        let mut values = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            values.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Table::from_values(values)
            .unwrap_or_else(|| Err(AppError::ParseError("CSV content has no header".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.header().len(), 3);
        assert_eq!(table.rows()[0][0], "Alice");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "a,b\n\"x, y\",\"line1\nline2\"\n";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows()[0][0], "x, y");
        assert_eq!(table.rows()[0][1], "line1\nline2");
    }

    #[test]
    fn test_short_rows_padded() {
        let table = CsvParser::new().parse_content("a,b,c\n1\n").unwrap();
        assert_eq!(table.rows()[0], vec!["1".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_trim_and_delimiter() {
        let table = CsvParser::new()
            .with_delimiter(b';')
            .with_trim(true)
            .parse_content("a ; b\n 1 ; 2 ")
            .unwrap();
        assert_eq!(table.header(), &["a".to_string(), "b".to_string()][..]);
        assert_eq!(table.rows()[0], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_empty_content_is_error() {
        assert!(CsvParser::new().parse_content("").is_err());
    }
}
