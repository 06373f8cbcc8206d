//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::CATALOG_PREFIX,
    validation::parse_id,
    AppState,
};

/// Builds the application router with every route and middleware layer
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(home::index))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_get).post(authors::create_post))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/delete", get(authors::delete_get).post(authors::delete_post))
        .route("/author/:id/update", get(authors::update_get).post(authors::update_post))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_get).post(genres::create_post))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/delete", get(genres::delete_get).post(genres::delete_post))
        .route("/genre/:id/update", get(genres::update_get).post(genres::update_post))
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_get).post(books::create_post))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/delete", get(books::delete_get).post(books::delete_post))
        .route("/book/:id/update", get(books::update_get).post(books::update_post))
        // Book copies
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_get).post(book_instances::create_post),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_get).post(book_instances::delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_get).post(book_instances::update_post),
        );

    Router::new()
        .route("/", get(home::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest(CATALOG_PREFIX, catalog)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 302 Found to `location`
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Parses a path identifier; a malformed one cannot name any record
pub(crate) fn path_id(raw: &str, what: &str) -> AppResult<Uuid> {
    parse_id(raw).ok_or_else(|| AppError::not_found(what))
}

/// Location of an entity kind's list page, e.g. `/catalog/authors`
pub(crate) fn list_url(kind: &str) -> String {
    format!("{}/{}s", CATALOG_PREFIX, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found() {
        let response = found("/catalog/genres");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/catalog/genres");
    }

    #[test]
    fn test_path_id() {
        let id = Uuid::now_v7();
        assert_eq!(path_id(&id.to_string(), "Genre").unwrap(), id);
        assert!(matches!(path_id("42", "Genre"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_list_url() {
        assert_eq!(list_url("bookinstance"), "/catalog/bookinstances");
    }
}
