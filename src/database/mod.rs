pub mod manager;
pub mod models;
pub mod operations;
pub mod postgres;

pub use manager::{DatabaseError, DatabaseManager};
pub use operations::DataOps;
pub use postgres::PgDataOps;
