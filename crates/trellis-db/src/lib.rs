//! PostgreSQL persistence layer for trellis.
//!
//! Row models, connection pool setup with embedded migrations, and one
//! query module per table. All query functions take an explicit `&PgPool`;
//! there is no global connection state.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
