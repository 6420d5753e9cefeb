// Service exports
pub mod export;
pub mod results;

pub use export::{export_csv, CsvMatchRow, ExportError};
pub use results::{ResultStore, StoredResult};
