pub mod deduplicate;
pub mod download_csv;
pub mod export;
pub mod remove_duplicates;
pub mod table_io;
