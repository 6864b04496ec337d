//! Wire types for the `proto` package
//!
//! Messages are declared here with `prost` derives; the `UserService` and
//! `BookService` stubs are generated by `build.rs` into
//! [`user_service_server`], [`user_service_client`], [`book_service_server`]
//! and [`book_service_client`].
//!
//! Messages also derive `serde` so the HTTP gateway can bind request bodies
//! straight into them. Missing JSON fields take their protobuf defaults.

use serde::{Deserialize, Serialize};

/// Fully qualified method paths, as seen by server-side middleware
pub mod methods {
    pub const SIGN_UP: &str = "/proto.UserService/SignUp";
    pub const SIGN_IN: &str = "/proto.UserService/SignIn";
    pub const CREATE_BOOK: &str = "/proto.BookService/CreateBook";
    pub const GET_BOOK: &str = "/proto.BookService/GetBook";
    pub const GET_BOOKS: &str = "/proto.BookService/GetBooks";
    pub const UPDATE_BOOK: &str = "/proto.BookService/UpdateBook";
    pub const DELETE_BOOK: &str = "/proto.BookService/DeleteBook";
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[prost(skip_debug)]
#[serde(default)]
pub struct User {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub username: String,
    #[prost(string, tag = "4")]
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UserId {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[prost(skip_debug)]
#[serde(default)]
pub struct SignInRequest {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    #[prost(string, tag = "1")]
    pub token: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub author: String,
    /// Owner's user id
    #[prost(uint32, tag = "4")]
    pub userid: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct BookId {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct BookList {
    #[prost(message, repeated, tag = "1")]
    pub books: Vec<Book>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct Empty {}

include!(concat!(env!("OUT_DIR"), "/proto.UserService.rs"));
include!(concat!(env!("OUT_DIR"), "/proto.BookService.rs"));
