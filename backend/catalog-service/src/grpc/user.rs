use crate::models::{Credentials, NewUser};
use crate::services::AuthService;
use catalog_proto::user_service_server::UserService;
use catalog_proto::{AuthResponse, SignInRequest, User, UserId};
use tonic::{Request, Response, Status};
use validator::Validate;

#[derive(Clone)]
pub struct UserGrpcService {
    auth: AuthService,
}

impl UserGrpcService {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

#[tonic::async_trait]
impl UserService for UserGrpcService {
    async fn sign_up(&self, request: Request<User>) -> Result<Response<UserId>, Status> {
        let candidate = NewUser::from(request.into_inner());
        let id = self.auth.register(candidate).await?;

        Ok(Response::new(UserId { id }))
    }

    async fn sign_in(
        &self,
        request: Request<SignInRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let credentials = Credentials::from(request.into_inner());
        credentials
            .validate()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        let token = self
            .auth
            .authenticate(&credentials.username, &credentials.password)
            .await?;

        Ok(Response::new(AuthResponse { token }))
    }
}
