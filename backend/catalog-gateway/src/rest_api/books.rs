/// Book API endpoints
///
/// GET /books - List books
/// GET /books/{id} - Get book
/// POST /books - Create book
/// PUT /books/{id} - Update own book
/// DELETE /books/{id} - Delete own book
///
/// Every handler forwards the caller's own session to catalog-service.
use actix_web::{http::StatusCode, web, HttpResponse};
use catalog_proto::{Book, BookId, Empty};
use tracing::{error, info};

use super::models::{BookListResponse, BookResponse, IdResponse, MessageResponse};
use crate::clients::{BookClient, ServiceClients};
use crate::error::GatewayError;
use crate::session::Session;

fn parse_id(raw: &str) -> Result<u32, GatewayError> {
    raw.parse::<u32>().map_err(|_| GatewayError::InvalidId)
}

fn book_client(
    clients: &ServiceClients,
    session: &Session,
) -> Result<BookClient, GatewayError> {
    Ok(clients.book_client(session.interceptor()?))
}

fn upstream(http_status: StatusCode) -> impl FnOnce(tonic::Status) -> GatewayError {
    move |status| {
        error!(error = %status, "Book call failed");
        GatewayError::upstream(status, http_status)
    }
}

/// GET /books
pub async fn list_books(
    session: Session,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!("GET /books");

    let response = book_client(&clients, &session)?
        .get_books(Empty {})
        .await
        .map_err(upstream(StatusCode::BAD_REQUEST))?;

    Ok(HttpResponse::Ok().json(BookListResponse {
        books: response.into_inner().books,
    }))
}

/// GET /books/{id}
pub async fn get_book(
    path: web::Path<String>,
    session: Session,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let id = parse_id(&path)?;
    info!(book_id = id, "GET /books/{{id}}");

    let response = book_client(&clients, &session)?
        .get_book(BookId { id })
        .await
        .map_err(upstream(StatusCode::NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(BookResponse {
        book: response.into_inner(),
    }))
}

/// POST /books
pub async fn create_book(
    req: web::Json<Book>,
    session: Session,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!(title = %req.title, "POST /books");

    let response = book_client(&clients, &session)?
        .create_book(req.into_inner())
        .await
        .map_err(upstream(StatusCode::BAD_REQUEST))?;

    Ok(HttpResponse::Created().json(IdResponse {
        id: response.into_inner().id,
    }))
}

/// PUT /books/{id}
pub async fn update_book(
    path: web::Path<String>,
    req: web::Json<Book>,
    session: Session,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let id = parse_id(&path)?;
    info!(book_id = id, "PUT /books/{{id}}");

    let mut book = req.into_inner();
    book.id = id;

    let response = book_client(&clients, &session)?
        .update_book(book)
        .await
        .map_err(upstream(StatusCode::BAD_REQUEST))?;

    Ok(HttpResponse::Ok().json(BookResponse {
        book: response.into_inner(),
    }))
}

/// DELETE /books/{id}
pub async fn delete_book(
    path: web::Path<String>,
    session: Session,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let id = parse_id(&path)?;
    info!(book_id = id, "DELETE /books/{{id}}");

    book_client(&clients, &session)?
        .delete_book(BookId { id })
        .await
        .map_err(upstream(StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "book deleted".to_string(),
    }))
}
