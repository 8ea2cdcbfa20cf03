//! # Domain Models
//!
//! These structs represent the core entities of rusty-blog. Relationships are
//! identifier-based (no owning references between entities); the Post/Comment
//! link is kept bidirectional by the services on every comment write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;
pub type PostId = Uuid;
pub type CommentId = Uuid;

/// A registered account. Created at registration, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique display name, stored trimmed.
    pub username: String,
    /// Unique, stored trimmed and lowercased.
    pub email: String,
    /// Argon2 PHC string. Never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// An authored article.
///
/// Invariant: `comments` holds exactly the ids of the Comment records whose
/// `post` field points back here. Both sides are written on every comment
/// create/delete; nothing is derived lazily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Stored trimmed.
    pub title: String,
    pub content: String,
    pub author: UserId,
    pub comments: Vec<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment attached to exactly one Post.
///
/// `is_markdown` selects the display rendering; the rendered form is computed
/// on every read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub is_markdown: bool,
    pub author: UserId,
    pub post: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Post {
    pub fn new(author: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Comment {
    pub fn new(author: UserId, post: PostId, content: String, is_markdown: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content,
            is_markdown,
            author,
            post,
            created_at: now,
            updated_at: now,
        }
    }
}
