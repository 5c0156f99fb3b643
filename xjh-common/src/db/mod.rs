//! Database schema, initialization and persistence

pub mod dao;
pub mod init;
pub mod schema_sync;
pub mod table_schemas;

pub use dao::{count, count_table, insert, truncate_all};
pub use init::*;
pub use table_schemas::{tables_in_construction_order, ContentTable};
