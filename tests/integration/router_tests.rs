//! In-process router tests backed by the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Datelike, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use homelib_server::{
    api,
    config::AppConfig,
    repository::{BookStore, InMemoryBookStore},
    services::Services,
    AppState,
};

fn app_with(store: Arc<InMemoryBookStore>) -> Router {
    let config = AppConfig {
        server: Default::default(),
        database: Default::default(),
        logging: Default::default(),
    };
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(store)),
    };
    api::create_router(state)
}

fn app() -> Router {
    app_with(Arc::new(InMemoryBookStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn book_payload() -> Value {
    json!({
        "title": "The Name of the Rose",
        "author": "Umberto Eco",
        "genre": "Mystery",
        "publish_year": 1980,
        "publisher": "Bompiani",
        "page_count": 512,
        "language": "Italian"
    })
}

#[tokio::test]
async fn test_health_check() {
    let response = send(&app(), Method::GET, "/api/v1/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");

    let response = send(&app(), Method::GET, "/api/v1/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_redirects_to_details() {
    let app = app();

    let response = send(&app, Method::POST, "/api/v1/books", Some(book_payload())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let details = location(&response).to_string();
    assert_eq!(details, "/api/v1/books/1");

    let response = send(&app, Method::GET, &details, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "The Name of the Rose");
    assert_eq!(body["publisher"], "Bompiani");
    assert!(body["table_of_contents"].is_null());
}

#[tokio::test]
async fn test_create_future_year_rerenders_form() {
    let mut payload = book_payload();
    payload["publish_year"] = json!(Local::now().year() + 1);
    payload["title"] = json!("");

    let response = send(&app(), Method::POST, "/api/v1/books", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert!(body["errors"]["publish_year"].is_array());
    assert!(body["errors"]["title"].is_array());
    assert_eq!(body["book"]["author"], "Umberto Eco");
    assert_eq!(body["current_year"], Local::now().year());
    let selected: Vec<&Value> = body["genres"]["options"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|o| o["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["value"], "Mystery");
}

#[tokio::test]
async fn test_create_whitespace_title_rerenders_form() {
    let store = Arc::new(InMemoryBookStore::new());
    let app = app_with(store.clone());
    let mut payload = book_payload();
    payload["title"] = json!("   ");
    payload["author"] = json!(" ");

    let response = send(&app, Method::POST, "/api/v1/books", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["errors"]["title"][0], "Title is required");
    assert_eq!(body["errors"]["author"][0], "Author is required");
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_null_fields_rerender_form() {
    let mut payload = book_payload();
    payload["title"] = Value::Null;
    payload["page_count"] = Value::Null;

    let response = send(&app(), Method::POST, "/api/v1/books", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["errors"]["title"].is_array());
    assert!(body["errors"]["page_count"].is_array());
    assert_eq!(body["book"]["author"], "Umberto Eco");
    assert_eq!(body["languages"]["options"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_malformed_body_is_json_bad_request() {
    let app = app();
    let mut payload = book_payload();
    payload["publish_year"] = json!("nineteen eighty");

    let response = send(&app, Method::POST, "/api/v1/books", Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 18);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].is_string());

    let response = send(&app, Method::POST, "/api/v1/books/1/edit", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "BadValue");
}

#[tokio::test]
async fn test_new_form_lists_options() {
    let response = send(&app(), Method::GET, "/api/v1/books/new", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["languages"]["options"].as_array().unwrap().len(), 8);
    assert_eq!(body["genres"]["options"].as_array().unwrap().len(), 16);
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_missing_book_is_not_found() {
    let app = app();
    for uri in ["/api/v1/books/99", "/api/v1/books/99/edit", "/api/v1/books/99/delete"] {
        let response = send(&app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_edit_flow() {
    let store = Arc::new(InMemoryBookStore::new());
    let id = store
        .create(&serde_json::from_value(book_payload()).unwrap())
        .await
        .unwrap();
    let app = app_with(store.clone());

    let response = send(&app, Method::GET, &format!("/api/v1/books/{}/edit", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut form = json_body(response).await["book"].clone();
    assert_eq!(form["id"], id);

    form["title"] = json!("Foucault's Pendulum");
    let response = send(&app, Method::POST, &format!("/api/v1/books/{}/edit", id), Some(form.clone())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/api/v1/books/{}", id));
    assert_eq!(store.get_by_id(id).await.unwrap().unwrap().title, "Foucault's Pendulum");

    // Payload id that does not match the path
    form["id"] = json!(id + 1);
    form["title"] = json!("Baudolino");
    let response = send(&app, Method::POST, &format!("/api/v1/books/{}/edit", id), Some(form)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.get_by_id(id).await.unwrap().unwrap().title, "Foucault's Pendulum");
}

#[tokio::test]
async fn test_edit_missing_row_reports_generic_error() {
    let mut payload = book_payload();
    payload["id"] = json!(7);

    let response = send(&app(), Method::POST, "/api/v1/books/7/edit", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(body["book"]["id"], 7);
}

#[tokio::test]
async fn test_delete_flow() {
    let app = app();
    send(&app, Method::POST, "/api/v1/books", Some(book_payload())).await;

    let response = send(&app, Method::GET, "/api/v1/books/1/delete", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["error"], false);

    let response = send(&app, Method::POST, "/api/v1/books/1/delete", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/books");

    let response = send(&app, Method::POST, "/api/v1/books/1/delete", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/books/1/delete?error=true");

    let response = send(&app, Method::GET, "/api/v1/books/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = app();
    send(&app, Method::POST, "/api/v1/books", Some(book_payload())).await;
    let mut romance = book_payload();
    romance["title"] = json!("Sense and Sensibility");
    romance["author"] = json!("Jane Austen");
    romance["genre"] = json!("Romance");
    romance["publisher"] = json!("Thomas Egerton");
    send(&app, Method::POST, "/api/v1/books", Some(romance)).await;

    let response = send(&app, Method::GET, "/api/v1/books/search?search_term=Roman", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["search_term"], "Roman");
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["genre"], "Romance");

    let response = send(&app, Method::GET, "/api/v1/books/search?search_term=%20%20", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/books");

    let response = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(json_body(response).await["books"].as_array().unwrap().len(), 2);
}
