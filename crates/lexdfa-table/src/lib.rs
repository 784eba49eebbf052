mod table;

pub use table::DfaTable;
pub use table::TableError;
