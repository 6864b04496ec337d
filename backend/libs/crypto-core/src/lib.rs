//! Cryptographic primitives shared by the catalog services
//!
//! - [`jwt`]: HS256 identity tokens (issue / parse)
//! - [`secret`]: signing secret strength assessment
pub mod jwt;
pub mod secret;

pub use jwt::{Claims, SubjectId, TokenCodec, TokenError};
pub use secret::{assess_secret, SecretStrength};
