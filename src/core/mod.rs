//! Core catalog engine.
//!
//! - `parser`: profile filename → server code + connection variant
//! - `directory`: static server code → country/city mapping
//! - `catalog`: classification of profiles into the three catalogs
//! - `filter`: free-text search over a catalog

pub mod catalog;
pub mod directory;
pub mod filter;
pub mod parser;

// Re-export commonly used items
pub use catalog::{resolve_record, CatalogBuilder, Catalogs, ServerRecord};
pub use directory::{ServerDirectory, ServerIdentity};
pub use filter::filter_servers;
pub use parser::ConnectionVariant;
