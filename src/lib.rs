//! msgboard: a minimal message board backend
//!
//! Exposes list/create/update/delete over a single message entity,
//! persisted in Postgres and served as JSON over HTTP.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
