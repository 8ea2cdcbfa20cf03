//! Seeds the database with demo users, posts and comments.
//!
//! Wipes existing rows first, then writes both sides of the post/comment
//! link the same way the live path does.

use std::env;
use std::sync::Arc;

use anyhow::Context;

use auth_adapters::Argon2PasswordHasher;
use domains::ports::{CommentRepo, PasswordHasher, PostRepo, UserRepo};
use domains::{Comment, Post, User};
use storage_adapters::PgStore;

const SAMPLE_PASSWORD: &str = "password123";

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
    ("alex_tech", "alex@example.com"),
    ("sarah_dev", "sarah@example.com"),
];

const SAMPLE_POSTS: &[(&str, &str)] = &[
    (
        "Getting Started with Rust",
        "Rust pairs memory safety with performance, which makes it a strong fit for network services.",
    ),
    (
        "Understanding Document Stores",
        "Document databases keep related data in flexible, JSON-like records instead of rigid rows.",
    ),
    (
        "RESTful API Design Best Practices",
        "Proper HTTP methods, status codes and resource naming go a long way toward a usable API.",
    ),
    (
        "Authentication with JWT",
        "Signed, time-limited tokens let a service verify identity without holding session state.",
    ),
    (
        "Error Handling that Scales",
        "A small, closed error taxonomy keeps failure behavior predictable as a codebase grows.",
    ),
];

const SAMPLE_COMMENTS: &[(&str, bool)] = &[
    (
        "Great article! I especially liked the part about **async/await** and *futures*.",
        true,
    ),
    (
        "Check out [the reference](https://doc.rust-lang.org/reference/) for more details.",
        true,
    ),
    ("This is a regular comment without any formatting.", false),
    (
        "I have a question about **JWT security**. How do you handle token refresh?",
        true,
    ),
    (
        "The error handling section was really helpful! *Thanks for sharing*.",
        true,
    ),
    (
        "I disagree with some points in the REST API design. Here's why...",
        false,
    ),
    (
        "Can you explain more about [indexes](https://www.postgresql.org/docs/current/indexes.html)?",
        true,
    ),
    (
        "This tutorial helped me understand **authentication** better!",
        true,
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;
    let store = Arc::new(PgStore::connect(&url).await?);

    // Clear existing data; comments first so the foreign keys hold.
    sqlx::query("DELETE FROM comments")
        .execute(store.pool())
        .await?;
    sqlx::query("DELETE FROM posts")
        .execute(store.pool())
        .await?;
    sqlx::query("DELETE FROM users")
        .execute(store.pool())
        .await?;
    println!("cleared existing data");

    let hasher = Argon2PasswordHasher::new();
    let mut users = Vec::new();
    for (username, email) in SAMPLE_USERS {
        let hash = hasher.hash(SAMPLE_PASSWORD).await?;
        let user = User::new((*username).to_owned(), (*email).to_owned(), hash);
        UserRepo::insert(store.as_ref(), user.clone()).await?;
        users.push(user);
    }
    println!("created {} users", users.len());

    let mut posts = Vec::new();
    for (i, (title, content)) in SAMPLE_POSTS.iter().enumerate() {
        let author = &users[i % users.len()];
        let post = Post::new(author.id, (*title).to_owned(), (*content).to_owned());
        PostRepo::insert(store.as_ref(), post.clone()).await?;
        posts.push(post);
    }
    println!("created {} posts", posts.len());

    // Two to four comments per post, cycling through the sample pool.
    let mut next = 0usize;
    let mut total = 0usize;
    for (i, post) in posts.iter_mut().enumerate() {
        for _ in 0..(2 + i % 3) {
            let (content, is_markdown) = SAMPLE_COMMENTS[next % SAMPLE_COMMENTS.len()];
            let author = &users[next % users.len()];
            next += 1;

            let comment = Comment::new(author.id, post.id, content.to_owned(), is_markdown);
            CommentRepo::insert(store.as_ref(), comment.clone()).await?;
            post.comments.push(comment.id);
            PostRepo::update(store.as_ref(), post).await?;
            total += 1;
        }
    }
    println!("created {total} comments");

    println!("database seeded successfully");
    Ok(())
}
