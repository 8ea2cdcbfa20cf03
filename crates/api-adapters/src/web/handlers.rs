//! Handlers: one thin function per route, each delegating straight to a
//! service and mapping the outcome through `ApiError`.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use services::{CommentView, PostView, UserView};

use super::dto::{
    AuthResponse, CreateCommentReq, CreatePostReq, LoginReq, RegisterReq, UpdateCommentReq,
    UpdatePostReq,
};
use super::error::ApiError;
use super::extract::CurrentUser;
use super::state::AppState;

type Headers = AppendHeaders<[(header::HeaderName, String); 1]>;

/// The token also travels as a cookie for browser clients; verification
/// only ever reads the Authorization header.
fn set_token_cookie(token: &str) -> Headers {
    AppendHeaders([(
        header::SET_COOKIE,
        format!("token={token}; Path=/; HttpOnly"),
    )])
}

fn clear_token_cookie() -> Headers {
    AppendHeaders([(
        header::SET_COOKIE,
        "token=; Path=/; HttpOnly; Max-Age=0".to_owned(),
    )])
}

// ── Users ────────────────────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state
        .users
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        set_token_cookie(&token),
        Json(AuthResponse::new(user, token)),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, token) = state.users.login(&req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        set_token_cookie(&token),
        Json(AuthResponse::new(user, token)),
    ))
}

/// Stateless: the server holds nothing to invalidate, so logging out just
/// tells the client to drop the cookie. The token stays valid until expiry.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        clear_token_cookie(),
        Json(json!({ "message": "Logged out successfully", "success": true })),
    )
}

pub async fn profile(CurrentUser(user): CurrentUser) -> Json<UserView> {
    Json(UserView::from(user))
}

// ── Posts ────────────────────────────────────────────────────────────────────

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostView>, ApiError> {
    Ok(Json(state.posts.get(id).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePostReq>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.create(&user, &req.title, &req.content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePostReq>,
) -> Result<Json<PostView>, ApiError> {
    Ok(Json(state.posts.update(id, user.id, req.into()).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.posts.delete(id, user.id).await?;
    Ok(Json(json!({
        "message": "Post and its comments deleted successfully"
    })))
}

// ── Comments ─────────────────────────────────────────────────────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(state.comments.list(id).await?))
}

pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateCommentReq>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .comments
        .create(id, &user, &req.content, req.is_markdown.unwrap_or(false))
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateCommentReq>,
) -> Result<Json<CommentView>, ApiError> {
    Ok(Json(
        state
            .comments
            .update(id, comment_id, &user, req.into())
            .await?,
    ))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.comments.delete(id, comment_id, user.id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
