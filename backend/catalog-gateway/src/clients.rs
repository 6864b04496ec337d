//! gRPC clients for catalog-service
//!
//! One lazily connected channel is shared by every request; HTTP/2
//! multiplexing handles concurrency. Book clients are built per request
//! around the caller's own session.

use catalog_proto::book_service_client::BookServiceClient;
use catalog_proto::user_service_client::UserServiceClient;
use grpc_jwt_propagation::JwtClientInterceptor;
use std::time::Duration;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};

pub type BookClient = BookServiceClient<InterceptedService<Channel, JwtClientInterceptor>>;

#[derive(Clone)]
pub struct ServiceClients {
    catalog_channel: Channel,
}

impl ServiceClients {
    /// Create clients for a catalog-service endpoint (e.g. "http://127.0.0.1:50051")
    ///
    /// Does not connect; the first call does.
    pub fn new(catalog_endpoint: &str) -> Result<Self, tonic::transport::Error> {
        Ok(Self {
            catalog_channel: Self::create_channel(catalog_endpoint)?,
        })
    }

    fn create_channel(endpoint: &str) -> Result<Channel, tonic::transport::Error> {
        Ok(Endpoint::from_shared(endpoint.to_string())?
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .http2_keep_alive_interval(Duration::from_secs(60))
            .keep_alive_timeout(Duration::from_secs(20))
            .keep_alive_while_idle(true)
            .connect_lazy())
    }

    pub fn user_client(&self) -> UserServiceClient<Channel> {
        UserServiceClient::new(self.catalog_channel.clone())
    }

    /// Book client that sends the given caller's token (if any) on every call
    pub fn book_client(&self, interceptor: JwtClientInterceptor) -> BookClient {
        BookServiceClient::with_interceptor(self.catalog_channel.clone(), interceptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clients_creation_is_lazy() {
        let clients = ServiceClients::new("http://127.0.0.1:1").unwrap();

        let _users = clients.user_client();
        let _books = clients.book_client(JwtClientInterceptor::anonymous());
    }

    #[test]
    fn test_invalid_endpoint_is_an_error() {
        assert!(ServiceClients::new("not a uri").is_err());
    }
}
