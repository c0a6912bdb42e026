// Service exports
pub mod table;

pub use table::{CsvTable, NameColumns, TableError, augment_records, cell_to_text, check_row_limit, pairs_from_records};
