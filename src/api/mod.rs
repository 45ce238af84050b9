//! API handlers for HomeLib REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book_form))
        .route("/books/search", get(books::search_books))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/edit", get(books::edit_book_form).post(books::update_book))
        .route(
            "/books/:id/delete",
            get(books::delete_confirmation).post(books::delete_book),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
