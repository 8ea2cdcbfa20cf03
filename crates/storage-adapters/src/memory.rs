//! In-memory store backed by dashmap.
//!
//! One map per entity, keyed by id. Each map operation is atomic; there is
//! no cross-map transaction, matching the per-document guarantees the
//! services are written against.

use async_trait::async_trait;
use dashmap::DashMap;

use domains::ports::{CommentRepo, PostRepo, UserRepo};
use domains::{Comment, CommentId, Post, PostId, Result, User, UserId};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    posts: DashMap<PostId, Post>,
    comments: DashMap<CommentId, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert(&self, user: User) -> Result<()> {
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .map(|u| u.value().clone()))
    }
}

#[async_trait]
impl PostRepo for MemoryStore {
    async fn insert(&self, post: Post) -> Result<()> {
        self.posts.insert(post.id, post);
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.value().clone()))
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        self.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<()> {
        self.posts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn insert(&self, comment: Comment) -> Result<()> {
        self.comments.insert(comment.id, comment);
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.value().clone()))
    }

    async fn list_for_post_newest_first(&self, post: PostId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.post == post)
            .map(|c| c.value().clone())
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> Result<()> {
        self.comments.remove(&id);
        Ok(())
    }

    async fn delete_for_post(&self, post: PostId) -> Result<u64> {
        let ids: Vec<CommentId> = self
            .comments
            .iter()
            .filter(|c| c.post == post)
            .map(|c| c.id)
            .collect();
        for id in &ids {
            self.comments.remove(id);
        }
        Ok(ids.len() as u64)
    }
}
