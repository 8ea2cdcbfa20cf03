//! # domains
//!
//! The central entities, port definitions and error type for rusty-blog.
//! No I/O lives here; adapters implement the ports.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{DomainError, Result};
pub use models::{Comment, CommentId, Post, PostId, User, UserId};
