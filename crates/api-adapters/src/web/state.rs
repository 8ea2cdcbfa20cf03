use services::{CommentService, PostService, UserService};

/// State shared across all request tasks. The services hold their ports
/// behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
}
