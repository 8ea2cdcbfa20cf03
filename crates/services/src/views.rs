//! Read models returned by the services.
//!
//! `CommentView::processed_content` is the computed-on-read field: it is
//! filled at view construction and never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use domains::ports::UserRepo;
use domains::{Comment, CommentId, DomainError, Post, PostId, Result, User, UserId};

use crate::render;

/// Owner display info embedded in post and comment responses.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Profile responses: the user record minus the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub is_markdown: bool,
    pub processed_content: String,
    pub author: AuthorView,
    pub post: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentView {
    pub fn hydrate(comment: &Comment, author: &User) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
            is_markdown: comment.is_markdown,
            processed_content: render::process(&comment.content, comment.is_markdown),
            author: AuthorView::from(author),
            post: comment.post,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: AuthorView,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    pub fn hydrate(post: Post, author: AuthorView, comments: Vec<CommentView>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Resolves a stored author reference. A dangling reference means the stores
/// are corrupt, which surfaces as an internal failure rather than a 404.
pub(crate) async fn author_view(users: &dyn UserRepo, id: UserId) -> Result<AuthorView> {
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::Internal(format!("author {id} is missing")))?;
    Ok(AuthorView::from(&user))
}

pub(crate) async fn comment_views(
    users: &dyn UserRepo,
    comments: &[Comment],
) -> Result<Vec<CommentView>> {
    let mut out = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = users
            .find_by_id(comment.author)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("author {} is missing", comment.author)))?;
        out.push(CommentView::hydrate(comment, &author));
    }
    Ok(out)
}
