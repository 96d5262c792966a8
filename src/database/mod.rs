pub mod manager;
pub mod schema;
pub mod sql;

pub use manager::{DatabaseError, DatabaseManager};
pub use sql::{sql_for_partial_update, SetClause, SqlValue, UpdateData};
