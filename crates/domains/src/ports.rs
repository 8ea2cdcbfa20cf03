//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.
//! Listing order contracts (newest-created-first) live here so the services
//! never re-sort.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, CommentId, Post, PostId, User, UserId};

/// Credential store: persistence for user records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: User) -> Result<()>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Duplicate check with OR semantics: a hit on either field counts.
    async fn find_by_username_or_email(&self, username: &str, email: &str)
        -> Result<Option<User>>;
}

/// Entity store: posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: Post) -> Result<()>;
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>>;
    /// All posts, newest-created-first.
    async fn list_newest_first(&self) -> Result<Vec<Post>>;
    /// Persists the full record, including the `comments` id list.
    async fn update(&self, post: &Post) -> Result<()>;
    async fn delete(&self, id: PostId) -> Result<()>;
}

/// Entity store: comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<()>;
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>>;
    /// Comments whose `post` field equals `post`, newest-created-first.
    async fn list_for_post_newest_first(&self, post: PostId) -> Result<Vec<Comment>>;
    async fn update(&self, comment: &Comment) -> Result<()>;
    async fn delete(&self, id: CommentId) -> Result<()>;
    /// Cascade helper: removes every comment referencing `post`.
    /// Returns the number of records removed.
    async fn delete_for_post(&self, post: PostId) -> Result<u64>;
}

/// One-way salted password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String>;
    /// Re-hashes the candidate with the stored salt and compares.
    /// Any malformed stored hash verifies as false, never as an error.
    async fn verify(&self, plain: &str, hash: &str) -> Result<bool>;
}

/// Signed, time-limited identity tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: UserId) -> Result<String>;
    /// Malformed, expired and wrong-signature tokens all collapse to the
    /// same Unauthorized outcome.
    fn verify(&self, token: &str) -> Result<UserId>;
}
