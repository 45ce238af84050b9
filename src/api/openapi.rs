//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HomeLib API",
        version = "0.1.0",
        description = "Home library catalog API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::new_book_form,
        books::create_book,
        books::edit_book_form,
        books::update_book,
        books::delete_confirmation,
        books::delete_book,
        books::search_books,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::BookFormView,
            crate::models::book::BookList,
            crate::models::book::DeleteConfirmation,
            crate::models::book::FieldErrors,
            crate::models::enums::SelectList,
            crate::models::enums::SelectOption,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
