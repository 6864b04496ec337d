// Build script for catalog-proto
// Generates UserService and BookService server and client stubs from Rust
// descriptors. Messages live in src/lib.rs; proto/catalog.proto documents the
// same contract for non-Rust clients.
use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path(CODEC)
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let user_service = Service::builder()
        .name("UserService")
        .package("proto")
        .method(method("sign_up", "SignUp", "crate::User", "crate::UserId"))
        .method(method(
            "sign_in",
            "SignIn",
            "crate::SignInRequest",
            "crate::AuthResponse",
        ))
        .build();

    let book_service = Service::builder()
        .name("BookService")
        .package("proto")
        .method(method("create_book", "CreateBook", "crate::Book", "crate::BookId"))
        .method(method("get_book", "GetBook", "crate::BookId", "crate::Book"))
        .method(method("get_books", "GetBooks", "crate::Empty", "crate::BookList"))
        .method(method("update_book", "UpdateBook", "crate::Book", "crate::Book"))
        .method(method("delete_book", "DeleteBook", "crate::BookId", "crate::Empty"))
        .build();

    Builder::new().compile(&[user_service, book_service]);
}
