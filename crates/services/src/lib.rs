//! # services
//!
//! The business rules of rusty-blog: identity and sessions, the post and
//! comment lifecycles with their ownership checks, and content rendering.
//! Everything here talks to the outside world through the `domains` ports.

pub mod comments;
pub mod posts;
pub mod render;
pub mod users;
pub mod views;

pub use comments::{CommentPatch, CommentService};
pub use posts::{PostPatch, PostService};
pub use users::UserService;
pub use views::{AuthorView, CommentView, PostView, UserView};
