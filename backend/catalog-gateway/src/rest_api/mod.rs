/// REST API for the book catalog
///
/// Thin HTTP-to-gRPC bridge over catalog-service.
pub mod auth;
pub mod books;
pub mod models;

use actix_web::{error::InternalError, web, HttpResponse};
use models::ErrorResponse;

/// Malformed JSON bodies answer 400 with the usual `{"error": ...}` shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Register every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/sign-in", web::get().to(auth::sign_in))
            .route("/sign-in", web::post().to(auth::sign_in)),
    )
    .service(
        web::scope("/books")
            .route("", web::get().to(books::list_books))
            .route("", web::post().to(books::create_book))
            .route("/{id}", web::get().to(books::get_book))
            .route("/{id}", web::put().to(books::update_book))
            .route("/{id}", web::delete().to(books::delete_book)),
    );
}
