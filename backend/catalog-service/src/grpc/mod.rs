/// gRPC layer for catalog-service
///
/// - `user`: UserService (SignUp, SignIn), both public
/// - `book`: BookService, every call requires a caller identity
/// - `server`: router assembly with the token layer in front
pub mod book;
pub mod server;
pub mod user;

pub use book::BookGrpcService;
pub use server::CatalogServer;
pub use user::UserGrpcService;
