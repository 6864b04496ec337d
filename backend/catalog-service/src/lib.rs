/// Catalog Service Library
///
/// Book catalog behind token-gated gRPC.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: User and book stores (PostgreSQL and in-memory)
/// - `error`: Error types
/// - `grpc`: gRPC handlers and server assembly
/// - `models`: Data models
/// - `security`: Password hashing
/// - `services`: Authorization and book logic
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;
pub mod security;
pub mod services;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use grpc::CatalogServer;
