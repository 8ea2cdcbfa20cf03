//! Axum routing for the blog API.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use extract::CurrentUser;
pub use state::AppState;

/// Builds the full route table.
///
/// Comment routes are nested under posts since a comment only exists in the
/// context of its post.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route("/users/logout", post(handlers::logout))
        .route("/users/profile", get(handlers::profile))
        .route("/posts", get(handlers::list_posts).post(handlers::create_post))
        .route(
            "/posts/{id}",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/posts/{id}/comments/{comment_id}",
            put(handlers::update_comment).delete(handlers::delete_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
