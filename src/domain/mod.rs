pub mod app_config;
pub mod cleanup;
pub mod error;
pub mod sheet_range;
pub mod table;
