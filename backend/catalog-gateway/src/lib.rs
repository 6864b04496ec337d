//! Catalog HTTP gateway
//!
//! Exposes the catalog gRPC services as JSON over HTTP. Each request's
//! `Authorization` header becomes that request's [`session::Session`].

pub mod clients;
pub mod config;
pub mod error;
pub mod rest_api;
pub mod session;

pub use clients::ServiceClients;
pub use error::GatewayError;
pub use session::Session;
