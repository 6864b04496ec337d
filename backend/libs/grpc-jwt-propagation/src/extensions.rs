//! Request Extension Trait for Call Identity Access
//!
//! Provides ergonomic helpers for reading the caller's identity from gRPC
//! request handlers.

use crate::CallIdentity;
use crypto_core::SubjectId;
use tonic::{Request, Status};

/// Extension trait for accessing the call identity from gRPC requests
///
/// This trait is implemented for all `Request<T>` types, providing access to
/// the identity stored by the server interceptor.
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::CallIdentityExt;
/// use tonic::{Request, Response, Status};
///
/// async fn delete_book(request: Request<()>) -> Result<Response<()>, Status> {
///     let user_id = request.caller_id()?;
///     // ... delete only books owned by `user_id`
///     Ok(Response::new(()))
/// }
/// ```
pub trait CallIdentityExt {
    /// Identity stored by the interceptor, if the call was authenticated
    fn call_identity(&self) -> Option<&CallIdentity>;

    /// Authenticated user ID
    ///
    /// ## Errors
    ///
    /// Returns `Status::unauthenticated` if the interceptor did not validate
    /// a token for this call (public method, or interceptor not installed).
    fn caller_id(&self) -> Result<SubjectId, Status> {
        self.call_identity()
            .map(CallIdentity::subject)
            .ok_or_else(|| Status::unauthenticated("user_id not found in context"))
    }
}

impl<T> CallIdentityExt for Request<T> {
    fn call_identity(&self) -> Option<&CallIdentity> {
        self.extensions().get::<CallIdentity>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_id_missing() {
        let request = Request::new(());
        let status = request.caller_id().unwrap_err();

        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "user_id not found in context");
    }

    #[test]
    fn test_caller_id_present() {
        let mut request = Request::new(());
        request.extensions_mut().insert(CallIdentity::new(42));

        assert_eq!(request.caller_id().unwrap(), 42);
        assert_eq!(request.call_identity().map(|id| id.subject()), Some(42));
    }

    #[test]
    fn test_unrelated_extensions_do_not_count() {
        let mut request = Request::new(());
        request.extensions_mut().insert(42u32);
        request.extensions_mut().insert(String::from("user_id"));

        assert!(request.caller_id().is_err());
    }
}
