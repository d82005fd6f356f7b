pub mod sql;
pub mod types;

pub use sql::{check_identifier, create_table_sql, insert_sql};
pub use types::{Column, ColumnType, EnrichedRow, RawRow};
