use super::{BookGrpcService, UserGrpcService};
use crate::services::{AuthService, BookService};
use catalog_proto::book_service_server::BookServiceServer;
use catalog_proto::user_service_server::UserServiceServer;
use grpc_jwt_propagation::{JwtServerLayer, PublicMethods};
use std::future::Future;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

/// Both gRPC services behind the token layer
///
/// `AuthService` doubles as the layer's token resolver.
#[derive(Clone)]
pub struct CatalogServer {
    auth: AuthService,
    books: BookService,
}

impl CatalogServer {
    pub fn new(auth: AuthService, books: BookService) -> Self {
        Self { auth, books }
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    ///
    /// In-flight calls are allowed to finish before this returns.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), tonic::transport::Error> {
        if let Ok(addr) = listener.local_addr() {
            info!("Starting gRPC server on {}", addr);
        }

        Server::builder()
            .layer(JwtServerLayer::new(self.auth.clone(), PublicMethods::default()))
            .add_service(UserServiceServer::new(UserGrpcService::new(self.auth)))
            .add_service(BookServiceServer::new(BookGrpcService::new(self.books)))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
    }
}
