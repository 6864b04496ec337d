/// Security primitives for catalog-service
///
/// - **password**: Argon2id credential hashing and verification
/// - **crypto-core::jwt**: HS256 identity tokens, shared with other crates
pub mod password;

pub use crypto_core::jwt;
pub use password::CredentialHasher;
