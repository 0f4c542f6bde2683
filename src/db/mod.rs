//! Database layer - connection pool and repositories
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Single-statement operations - the database is the commit point
//! - Mutations use RETURNING so callers see the committed row

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
