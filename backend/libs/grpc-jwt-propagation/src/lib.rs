//! Bearer Token Propagation for the Catalog gRPC Services
//!
//! Carries a caller's token from the HTTP gateway into the gRPC server and
//! turns it into a per-call identity that handlers can read.
//!
//! ## Core Components
//!
//! - **JwtClientInterceptor**: attaches `authorization: Bearer <token>` to outgoing calls
//! - **JwtServerLayer**: validates the token on every non-public method
//! - **CallIdentity**: the subject id left in the request extensions
//! - **CallIdentityExt**: handler-side accessor (`request.caller_id()?`)
//!
//! ## Server Side
//!
//! ```rust,ignore
//! use grpc_jwt_propagation::{JwtServerLayer, PublicMethods};
//!
//! Server::builder()
//!     .layer(JwtServerLayer::new(auth_service, PublicMethods::default()))
//!     .add_service(UserServiceServer::new(users))
//!     .add_service(BookServiceServer::new(books))
//!     .serve(addr)
//!     .await?;
//! ```
//!
//! Rejections are `UNAUTHENTICATED` with one of the messages
//! `missing metadata`, `missing token`, or `invalid token: <cause>`.

mod client;
mod extensions;
mod identity;
mod server;

pub use client::JwtClientInterceptor;
pub use extensions::CallIdentityExt;
pub use identity::CallIdentity;
pub use server::{
    AuthError, JwtServerInterceptor, JwtServerLayer, JwtServerService, PublicMethods,
    TokenResolver, AUTHORIZATION_METADATA_KEY, BEARER_PREFIX, DEFAULT_PUBLIC_METHODS,
};

// Re-export tonic Status for convenience
pub use tonic::Status;
