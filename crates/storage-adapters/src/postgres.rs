//! Postgres store.
//!
//! Maps the relational rows back to the domain models. The post's comment id
//! list is a `uuid[]` column, so the bidirectional Post/Comment link is
//! stored exactly as the services maintain it.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use domains::ports::{CommentRepo, PostRepo, UserRepo};
use domains::{Comment, CommentId, DomainError, Post, PostId, Result, User, UserId};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and brings the schema up to date.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("connected to postgres");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn internal(err: sqlx::Error) -> DomainError {
    DomainError::Internal(err.to_string())
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

fn post_from_row(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        author: row.get("author"),
        comments: row.get("comment_ids"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        is_markdown: row.get("is_markdown"),
        author: row.get("author"),
        post: row.get("post"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl UserRepo for PgStore {
    async fn insert(&self, user: User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            // A racing registration can slip past the service-level check;
            // the unique indexes turn it into the same Conflict outcome.
            Some(db) if db.is_unique_violation() => {
                DomainError::Conflict("User already exists".into())
            }
            _ => internal(e),
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1 OR email = $2 LIMIT 1")
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.as_ref().map(user_from_row))
    }
}

#[async_trait]
impl PostRepo for PgStore {
    async fn insert(&self, post: Post) -> Result<()> {
        sqlx::query(
            "INSERT INTO posts (id, title, content, author, comment_ids, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author)
        .bind(&post.comments)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "UPDATE posts SET title = $2, content = $3, comment_ids = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.comments)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;
        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepo for PgStore {
    async fn insert(&self, comment: Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, content, is_markdown, author, post, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.is_markdown)
        .bind(comment.author)
        .bind(comment.post)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.as_ref().map(comment_from_row))
    }

    async fn list_for_post_newest_first(&self, post: PostId) -> Result<Vec<Comment>> {
        let rows = sqlx::query("SELECT * FROM comments WHERE post = $1 ORDER BY created_at DESC")
            .bind(post)
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;
        Ok(rows.iter().map(comment_from_row).collect())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "UPDATE comments SET content = $2, is_markdown = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.is_markdown)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(())
    }

    async fn delete_for_post(&self, post: PostId) -> Result<u64> {
        let done = sqlx::query("DELETE FROM comments WHERE post = $1")
            .bind(post)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(done.rows_affected())
    }
}
