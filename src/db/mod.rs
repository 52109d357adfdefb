pub mod cell;
pub mod initialize;
pub mod memory;
pub mod pool;
pub mod sqlite;
pub mod workbook;

pub use cell::Cell;
pub use memory::MemoryWorkbook;
pub use sqlite::SqliteWorkbook;
pub use workbook::Workbook;
