use crate::models::{BookPatch, NewBook};
use crate::services::BookService as Books;
use catalog_proto::book_service_server::BookService;
use catalog_proto::{Book, BookId, BookList, Empty};
use grpc_jwt_propagation::CallIdentityExt;
use tonic::{Request, Response, Status};

#[derive(Clone)]
pub struct BookGrpcService {
    books: Books,
}

impl BookGrpcService {
    pub fn new(books: Books) -> Self {
        Self { books }
    }
}

#[tonic::async_trait]
impl BookService for BookGrpcService {
    async fn create_book(&self, request: Request<Book>) -> Result<Response<BookId>, Status> {
        let owner = request.caller_id()?;
        let req = request.into_inner();

        let id = self
            .books
            .create(
                owner,
                NewBook {
                    title: req.title,
                    author: req.author,
                },
            )
            .await?;

        Ok(Response::new(BookId { id }))
    }

    async fn get_book(&self, request: Request<BookId>) -> Result<Response<Book>, Status> {
        request.caller_id()?;
        let book = self.books.get(request.get_ref().id).await?;

        Ok(Response::new(book.into()))
    }

    async fn get_books(&self, request: Request<Empty>) -> Result<Response<BookList>, Status> {
        request.caller_id()?;
        let books = self.books.list().await?;

        Ok(Response::new(BookList {
            books: books.into_iter().map(Into::into).collect(),
        }))
    }

    async fn update_book(&self, request: Request<Book>) -> Result<Response<Book>, Status> {
        let owner = request.caller_id()?;
        let req = request.into_inner();

        let patch = BookPatch::new(req.title.clone(), req.author.clone());
        self.books.update(owner, req.id, patch).await?;

        Ok(Response::new(req))
    }

    async fn delete_book(&self, request: Request<BookId>) -> Result<Response<Empty>, Status> {
        let owner = request.caller_id()?;
        self.books.delete(owner, request.get_ref().id).await?;

        Ok(Response::new(Empty {}))
    }
}
