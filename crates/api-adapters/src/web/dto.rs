//! Request and response bodies.
//!
//! Request string fields default to empty rather than rejecting at the
//! deserializer, so presence checks stay in the services and produce the
//! API's own error shape instead of a framework rejection.

use serde::{Deserialize, Serialize};

use domains::{User, UserId};
use services::{CommentPatch, PostPatch};

#[derive(Debug, Deserialize)]
pub struct RegisterReq {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of successful register/login responses.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostReq {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostReq {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostReq> for PostPatch {
    fn from(req: UpdatePostReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentReq {
    #[serde(default)]
    pub content: String,
    pub is_markdown: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCommentReq {
    pub content: Option<String>,
    pub is_markdown: Option<bool>,
}

impl From<UpdateCommentReq> for CommentPatch {
    fn from(req: UpdateCommentReq) -> Self {
        Self {
            content: req.content,
            is_markdown: req.is_markdown,
        }
    }
}
