//! Per-request caller session
//!
//! The gateway keeps no token of its own. Each HTTP request carries its
//! caller's token in `Authorization`, and that token travels with the gRPC
//! calls made on the caller's behalf and nowhere else.

use crate::error::GatewayError;
use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use grpc_jwt_propagation::{JwtClientInterceptor, BEARER_PREFIX};
use std::future::{ready, Ready};

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Read the caller's token from an `Authorization` header value
    ///
    /// `Bearer <token>` and a bare token are both accepted; an empty value
    /// means no token.
    pub fn from_header(value: &str) -> Self {
        let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
        if token.is_empty() {
            Self::anonymous()
        } else {
            Self::with_token(token)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Client interceptor carrying this session's token, or nothing
    pub fn interceptor(&self) -> Result<JwtClientInterceptor, GatewayError> {
        match &self.token {
            Some(token) => {
                JwtClientInterceptor::new(token).map_err(|_| GatewayError::InvalidAuthorization)
            }
            None => Ok(JwtClientInterceptor::anonymous()),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl FromRequest for Session {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = match req.headers().get(header::AUTHORIZATION) {
            None => Ok(Session::anonymous()),
            Some(value) => value
                .to_str()
                .map(Session::from_header)
                .map_err(|_| GatewayError::InvalidAuthorization),
        };
        ready(session)
    }
}
