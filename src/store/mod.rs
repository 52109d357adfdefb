pub mod record;
pub mod schema;
pub mod table;

pub use record::{Record, row_to_object};
pub use schema::TableSchema;
pub use table::{DEFAULT_CACHE_TTL, HeaderCheck, RowRef, Snapshot, Table};
