/// Authentication API endpoints
///
/// POST /auth/sign-up - Register new user
/// GET|POST /auth/sign-in - Exchange credentials for a token
use actix_web::{http::StatusCode, web, HttpResponse};
use catalog_proto::{SignInRequest, User};
use tracing::{error, info};

use super::models::{IdResponse, TokenResponse};
use crate::clients::ServiceClients;
use crate::error::GatewayError;

/// POST /auth/sign-up
pub async fn sign_up(
    req: web::Json<User>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!(username = %req.username, "POST /auth/sign-up");

    let response = clients
        .user_client()
        .sign_up(req.into_inner())
        .await
        .map_err(|status| {
            error!(error = %status, "Sign-up failed");
            GatewayError::upstream(status, StatusCode::BAD_REQUEST)
        })?;

    Ok(HttpResponse::Created().json(IdResponse {
        id: response.into_inner().id,
    }))
}

/// GET|POST /auth/sign-in
///
/// The token is returned to the caller, who sends it back as
/// `Authorization: Bearer <token>` on book requests.
pub async fn sign_in(
    req: web::Json<SignInRequest>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!(username = %req.username, "/auth/sign-in");

    let response = clients
        .user_client()
        .sign_in(req.into_inner())
        .await
        .map_err(|status| {
            error!(error = %status, "Sign-in failed");
            GatewayError::upstream(status, StatusCode::BAD_REQUEST)
        })?;

    Ok(HttpResponse::Created().json(TokenResponse {
        token: response.into_inner().token,
    }))
}
