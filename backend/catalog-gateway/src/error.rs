use crate::rest_api::models::ErrorResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid id")]
    InvalidId,

    #[error("invalid authorization header")]
    InvalidAuthorization,

    #[error("{}", .status.message())]
    Upstream {
        status: tonic::Status,
        http_status: StatusCode,
    },
}

impl GatewayError {
    /// Wrap a failed gRPC call, answering with `http_status`
    pub fn upstream(status: tonic::Status, http_status: StatusCode) -> Self {
        GatewayError::Upstream {
            status,
            http_status,
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidId | GatewayError::InvalidAuthorization => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { http_status, .. } => *http_status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_is_bad_request() {
        assert_eq!(GatewayError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::InvalidId.to_string(), "invalid id");
    }

    #[test]
    fn test_upstream_uses_status_message() {
        let err = GatewayError::upstream(
            tonic::Status::not_found("book not found"),
            StatusCode::NOT_FOUND,
        );

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "book not found");
    }
}
