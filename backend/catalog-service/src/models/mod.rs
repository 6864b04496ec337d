pub mod book;
pub mod user;

pub use book::{Book, BookPatch, NewBook};
pub use user::{Credentials, NewUser, User, UserInsert};
