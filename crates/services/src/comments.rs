//! Comment lifecycle: create, list, update, delete.
//!
//! A comment id must appear in its parent post's `comments` list at all
//! times. Update and delete check both that list and the comment store
//! before touching anything; create and delete write both sides.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use domains::ports::{CommentRepo, PostRepo, UserRepo};
use domains::{Comment, CommentId, DomainError, Post, PostId, Result, User, UserId};

use crate::views::{self, CommentView};

/// Sparse update payload. Content follows the same absent/empty rule as
/// posts; the markdown flag changes only when explicitly present.
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub is_markdown: Option<bool>,
}

#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepo>,
    comments: Arc<dyn CommentRepo>,
    users: Arc<dyn UserRepo>,
}

impl CommentService {
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

    pub async fn create(
        &self,
        post_id: PostId,
        actor: &User,
        content: &str,
        is_markdown: bool,
    ) -> Result<CommentView> {
        let mut post = self.require_post(post_id).await?;
        if content.is_empty() {
            return Err(DomainError::Validation("Content is required".into()));
        }

        let comment = Comment::new(actor.id, post.id, content.to_owned(), is_markdown);

        // Two sequential writes; the store is atomic per record only.
        self.comments.insert(comment.clone()).await?;
        post.comments.push(comment.id);
        self.posts.update(&post).await?;

        info!(comment = %comment.id, post = %post.id, author = %actor.id, "created comment");
        Ok(CommentView::hydrate(&comment, actor))
    }

    /// Comments on a post, newest-created-first, authors resolved and
    /// content rendered.
    pub async fn list(&self, post_id: PostId) -> Result<Vec<CommentView>> {
        let post = self.require_post(post_id).await?;
        let comments = self
            .comments
            .list_for_post_newest_first(post.id)
            .await?;
        views::comment_views(self.users.as_ref(), &comments).await
    }

    pub async fn update(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: &User,
        patch: CommentPatch,
    ) -> Result<CommentView> {
        let post = self.require_post(post_id).await?;
        let mut comment = self.require_on_post(&post, comment_id).await?;
        if comment.author != actor.id {
            return Err(DomainError::Forbidden(
                "Not authorized to update this comment".into(),
            ));
        }

        if let Some(content) = patch.content.filter(|c| !c.is_empty()) {
            comment.content = content;
        }
        if let Some(flag) = patch.is_markdown {
            comment.is_markdown = flag;
        }
        comment.updated_at = Utc::now();

        self.comments.update(&comment).await?;
        Ok(CommentView::hydrate(&comment, actor))
    }

    /// Deletion is allowed for the comment's author or the post's author.
    pub async fn delete(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> Result<()> {
        let mut post = self.require_post(post_id).await?;
        let comment = self.require_on_post(&post, comment_id).await?;
        if comment.author != actor && post.author != actor {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this comment".into(),
            ));
        }

        post.comments.retain(|id| *id != comment.id);
        self.posts.update(&post).await?;
        self.comments.delete(comment.id).await?;

        info!(comment = %comment.id, post = %post.id, "deleted comment");
        Ok(())
    }

    async fn require_post(&self, id: PostId) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post not found".into()))
    }

    /// The dual check: the id must be in the post's own `comments` list AND
    /// resolve in the comment store. Either miss is a NotFound.
    async fn require_on_post(&self, post: &Post, comment_id: CommentId) -> Result<Comment> {
        if !post.comments.contains(&comment_id) {
            return Err(not_on_post());
        }
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(not_on_post)
    }
}

fn not_on_post() -> DomainError {
    DomainError::NotFound("Comment not found on this post".into())
}
