//! Post lifecycle: create, list, get, update, delete.
//!
//! Only the author mutates a post, and deleting one takes every comment
//! referencing it down with it.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use domains::ports::{CommentRepo, PostRepo, UserRepo};
use domains::{DomainError, Post, PostId, Result, User, UserId};

use crate::views::{self, PostView};

/// Sparse update payload. Absent or empty fields leave the stored value
/// untouched; an empty string cannot clear a field.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepo>,
    comments: Arc<dyn CommentRepo>,
    users: Arc<dyn UserRepo>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        comments: Arc<dyn CommentRepo>,
        users: Arc<dyn UserRepo>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
        }
    }

    pub async fn create(&self, actor: &User, title: &str, content: &str) -> Result<PostView> {
        let title = title.trim();
        if title.is_empty() || content.is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required".into(),
            ));
        }

        let post = Post::new(actor.id, title.to_owned(), content.to_owned());
        self.posts.insert(post.clone()).await?;
        info!(post = %post.id, author = %actor.id, "created post");
        self.view(post).await
    }

    /// All posts, newest-created-first, with authors and rendered comments.
    pub async fn list(&self) -> Result<Vec<PostView>> {
        let posts = self.posts.list_newest_first().await?;
        let mut out = Vec::with_capacity(posts.len());
        for post in posts {
            out.push(self.view(post).await?);
        }
        Ok(out)
    }

    pub async fn get(&self, id: PostId) -> Result<PostView> {
        let post = self.require(id).await?;
        self.view(post).await
    }

    pub async fn update(&self, id: PostId, actor: UserId, patch: PostPatch) -> Result<PostView> {
        let mut post = self.require(id).await?;
        if post.author != actor {
            return Err(DomainError::Forbidden(
                "Not authorized to update this post".into(),
            ));
        }

        if let Some(title) = patch.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            post.title = title.to_owned();
        }
        if let Some(content) = patch.content.filter(|c| !c.is_empty()) {
            post.content = content;
        }
        post.updated_at = Utc::now();

        self.posts.update(&post).await?;
        self.view(post).await
    }

    /// Removes the post and, first, every comment referencing it, so no
    /// comment survives its parent.
    pub async fn delete(&self, id: PostId, actor: UserId) -> Result<()> {
        let post = self.require(id).await?;
        if post.author != actor {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this post".into(),
            ));
        }

        let removed = self.comments.delete_for_post(post.id).await?;
        self.posts.delete(post.id).await?;
        info!(post = %post.id, comments = removed, "deleted post and its comments");
        Ok(())
    }

    async fn require(&self, id: PostId) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post not found".into()))
    }

    async fn view(&self, post: Post) -> Result<PostView> {
        let author = views::author_view(self.users.as_ref(), post.author).await?;
        let comments = self
            .comments
            .list_for_post_newest_first(post.id)
            .await?;
        let comments = views::comment_views(self.users.as_ref(), &comments).await?;
        Ok(PostView::hydrate(post, author, comments))
    }
}
