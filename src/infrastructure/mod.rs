pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod csv;
pub mod table_store;
