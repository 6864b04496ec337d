//! Server-Side Token Validation Layer
//!
//! Validates the bearer token on every incoming gRPC call, except for the
//! methods on the public allow-list, and attaches the resulting
//! [`CallIdentity`] to the request extensions.
//!
//! The check runs as a tower layer rather than a `tonic::service::Interceptor`
//! because the allow-list needs the full method path, which only the HTTP
//! request URI carries.

use crate::CallIdentity;
use crypto_core::SubjectId;
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::body::BoxBody;
use tonic::metadata::MetadataMap;
use tonic::Status;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Metadata key carrying the bearer token
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// Prefix stripped from the authorization value when present
pub const BEARER_PREFIX: &str = "Bearer ";

/// Methods that never require a token
pub const DEFAULT_PUBLIC_METHODS: [&str; 2] = [
    "/proto.UserService/SignUp",
    "/proto.UserService/SignIn",
];

/// Turns a raw token into a subject identifier
///
/// Implemented by whatever owns the signing secret. The error's `Display`
/// text becomes the cause in `invalid token: <cause>`.
pub trait TokenResolver: Send + Sync + 'static {
    type Error: fmt::Display;

    fn resolve(&self, token: &str) -> Result<SubjectId, Self::Error>;
}

impl<R: TokenResolver> TokenResolver for Arc<R> {
    type Error = R::Error;

    fn resolve(&self, token: &str) -> Result<SubjectId, Self::Error> {
        (**self).resolve(token)
    }
}

/// Rejection reasons, surfaced to clients as `UNAUTHENTICATED`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing metadata")]
    MissingMetadata,

    #[error("missing token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl AuthError {
    pub fn to_status(&self) -> Status {
        Status::unauthenticated(self.to_string())
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        err.to_status()
    }
}

/// Set of full method paths (`/package.Service/Method`) exempt from auth
#[derive(Debug, Clone)]
pub struct PublicMethods {
    methods: Arc<HashSet<String>>,
}

impl PublicMethods {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: Arc::new(methods.into_iter().map(Into::into).collect()),
        }
    }

    /// Allow-list with no entries; every method requires a token
    pub fn none() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(method)
    }
}

impl Default for PublicMethods {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_METHODS)
    }
}

/// Authorization decision for a single call
///
/// Holds the resolver and the allow-list. Stateless per call; clones share
/// both through `Arc`.
pub struct JwtServerInterceptor<R> {
    resolver: Arc<R>,
    public_methods: PublicMethods,
}

impl<R> Clone for JwtServerInterceptor<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            public_methods: self.public_methods.clone(),
        }
    }
}

impl<R: TokenResolver> JwtServerInterceptor<R> {
    pub fn new(resolver: R, public_methods: PublicMethods) -> Self {
        Self {
            resolver: Arc::new(resolver),
            public_methods,
        }
    }

    /// Decide whether `method` may proceed
    ///
    /// Returns `Ok(None)` for allow-listed methods, which are passed through
    /// without looking at metadata. Otherwise the first `authorization`
    /// value is read, a leading `Bearer ` is stripped, and the remainder is
    /// handed to the resolver.
    pub fn authorize(
        &self,
        method: &str,
        metadata: Option<&MetadataMap>,
    ) -> Result<Option<CallIdentity>, AuthError> {
        if self.public_methods.contains(method) {
            return Ok(None);
        }

        let metadata = metadata.ok_or(AuthError::MissingMetadata)?;
        let value = metadata
            .get_all(AUTHORIZATION_METADATA_KEY)
            .iter()
            .next()
            .ok_or(AuthError::MissingToken)?;

        let raw = value.to_str().map_err(|_| {
            AuthError::InvalidToken("authorization value is not valid ASCII".to_string())
        })?;
        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);

        let subject = self
            .resolver
            .resolve(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(Some(CallIdentity::new(subject)))
    }
}

/// Tower layer installing [`JwtServerInterceptor`] in front of a gRPC router
///
/// ```rust,ignore
/// Server::builder()
///     .layer(JwtServerLayer::new(auth_service, PublicMethods::default()))
///     .add_service(UserServiceServer::new(users))
///     .add_service(BookServiceServer::new(books))
/// ```
pub struct JwtServerLayer<R> {
    interceptor: JwtServerInterceptor<R>,
}

impl<R> Clone for JwtServerLayer<R> {
    fn clone(&self) -> Self {
        Self {
            interceptor: self.interceptor.clone(),
        }
    }
}

impl<R: TokenResolver> JwtServerLayer<R> {
    pub fn new(resolver: R, public_methods: PublicMethods) -> Self {
        Self {
            interceptor: JwtServerInterceptor::new(resolver, public_methods),
        }
    }
}

impl<S, R> Layer<S> for JwtServerLayer<R> {
    type Service = JwtServerService<S, R>;

    fn layer(&self, inner: S) -> Self::Service {
        JwtServerService {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

/// Service produced by [`JwtServerLayer`]
pub struct JwtServerService<S, R> {
    inner: S,
    interceptor: JwtServerInterceptor<R>,
}

impl<S: Clone, R> Clone for JwtServerService<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            interceptor: self.interceptor.clone(),
        }
    }
}

impl<S, R, ReqBody> Service<http::Request<ReqBody>> for JwtServerService<S, R>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<BoxBody>>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
    R: TokenResolver,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<ReqBody>) -> Self::Future {
        let method = req.uri().path().to_owned();
        let metadata = (!req.headers().is_empty())
            .then(|| MetadataMap::from_headers(req.headers().clone()));

        match self.interceptor.authorize(&method, metadata.as_ref()) {
            Ok(Some(identity)) => {
                debug!(method = %method, user_id = identity.subject(), "Call authenticated");
                req.extensions_mut().insert(identity);
            }
            Ok(None) => {
                debug!(method = %method, "Public method, skipping token check");
            }
            Err(err) => {
                warn!(method = %method, error = %err, "Rejected unauthenticated call");
                let response = err.to_status().into_http();
                return Box::pin(async move { Ok(response) });
            }
        }

        // The readied service is the one that must handle this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(inner.call(req))
    }
}
