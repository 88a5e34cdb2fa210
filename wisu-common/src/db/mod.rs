//! Database initialization, schema, and typed records

pub mod init;
pub mod models;

pub use init::*;
pub use models::*;
