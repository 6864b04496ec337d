//! Client-Side Token Attachment
//!
//! Attaches a caller's bearer token to outgoing gRPC calls. Each interceptor
//! carries at most one token and is meant to be built per caller, so two
//! concurrent callers never see each other's credentials.

use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::server::{AUTHORIZATION_METADATA_KEY, BEARER_PREFIX};

/// Client interceptor that adds `authorization: Bearer <token>` when a token
/// is present and leaves the metadata alone otherwise
///
/// ## Example
///
/// ```rust,no_run
/// use grpc_jwt_propagation::JwtClientInterceptor;
///
/// # fn example(token: &str) -> Result<(), tonic::Status> {
/// let interceptor = JwtClientInterceptor::new(token)?;
/// // BookServiceClient::with_interceptor(channel.clone(), interceptor)
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct JwtClientInterceptor {
    auth_header: Option<AsciiMetadataValue>,
}

impl JwtClientInterceptor {
    /// Build an interceptor for a raw token (without the `Bearer ` prefix)
    ///
    /// ## Errors
    ///
    /// Returns `Status::invalid_argument` if the token cannot be encoded as
    /// an ASCII metadata value.
    pub fn new(jwt_token: impl AsRef<str>) -> Result<Self, Status> {
        let header = format!("{BEARER_PREFIX}{}", jwt_token.as_ref());
        let auth_header = header
            .parse::<AsciiMetadataValue>()
            .map_err(|_| Status::invalid_argument("token is not a valid metadata value"))?;

        Ok(Self {
            auth_header: Some(auth_header),
        })
    }

    /// Interceptor that sends no authorization metadata
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether calls made through this interceptor carry a token
    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }
}

impl std::fmt::Debug for JwtClientInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtClientInterceptor")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Interceptor for JwtClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(header) = &self.auth_header {
            request
                .metadata_mut()
                .insert(AUTHORIZATION_METADATA_KEY, header.clone());
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_interceptor_adds_header() {
        let mut interceptor = JwtClientInterceptor::new("test_token").unwrap();
        let request = interceptor.call(Request::new(())).unwrap();

        let auth_header = request
            .metadata()
            .get(AUTHORIZATION_METADATA_KEY)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(auth_header, "Bearer test_token");
    }

    #[test]
    fn test_anonymous_interceptor_sends_nothing() {
        let mut interceptor = JwtClientInterceptor::anonymous();
        let request = interceptor.call(Request::new(())).unwrap();

        assert!(!interceptor.is_authenticated());
        assert!(request.metadata().get(AUTHORIZATION_METADATA_KEY).is_none());
    }

    #[test]
    fn test_invalid_token_is_rejected_at_construction() {
        let err = JwtClientInterceptor::new("line\nbreak").unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_debug_hides_token() {
        let interceptor = JwtClientInterceptor::new("super-secret-token").unwrap();
        let rendered = format!("{interceptor:?}");

        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("authenticated: true"));
    }

    #[test]
    fn test_separate_interceptors_do_not_share_tokens() {
        let mut alice = JwtClientInterceptor::new("alice").unwrap();
        let mut bob = JwtClientInterceptor::new("bob").unwrap();

        let a = alice.call(Request::new(())).unwrap();
        let b = bob.call(Request::new(())).unwrap();

        assert_eq!(
            a.metadata().get(AUTHORIZATION_METADATA_KEY).unwrap(),
            "Bearer alice"
        );
        assert_eq!(
            b.metadata().get(AUTHORIZATION_METADATA_KEY).unwrap(),
            "Bearer bob"
        );
    }
}
