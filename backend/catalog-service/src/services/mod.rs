pub mod auth;
pub mod books;

pub use auth::AuthService;
pub use books::BookService;
