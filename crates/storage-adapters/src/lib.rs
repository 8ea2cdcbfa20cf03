//! # storage-adapters
//!
//! Entity and credential store implementations behind the `domains` ports:
//! an in-memory store for tests and single-process runs, and a Postgres
//! store behind the `db-postgres` feature.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryStore;

#[cfg(feature = "db-postgres")]
pub use postgres::PgStore;
