//! Comment lifecycle rules: the bidirectional post link, the dual
//! existence/membership check, author-only updates and two-owner deletes.

use api_adapters::web::AppState;
use domains::ports::{CommentRepo, PostRepo};
use domains::{DomainError, User};
use integration_tests::{memory_app, memory_state};
use services::CommentPatch;

async fn registered(state: &AppState, name: &str) -> User {
    state
        .users
        .register(name, &format!("{name}@example.com"), "password123")
        .await
        .unwrap()
        .0
}

#[tokio::test]
async fn create_writes_both_sides_of_the_link() {
    let (state, store) = memory_app();
    let author = registered(&state, "john_doe").await;
    let post = state.posts.create(&author, "title", "body").await.unwrap();

    let comment = state
        .comments
        .create(post.id, &author, "hello", false)
        .await
        .unwrap();

    let stored_post = PostRepo::find_by_id(store.as_ref(), post.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored_post.comments.contains(&comment.id));
    assert!(CommentRepo::find_by_id(store.as_ref(), comment.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn create_fails_without_a_parent_post() {
    let state = memory_state();
    let author = registered(&state, "john_doe").await;

    let err = state
        .comments
        .create(uuid::Uuid::new_v4(), &author, "hello", false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Post not found");
}

#[tokio::test]
async fn create_requires_content() {
    let state = memory_state();
    let author = registered(&state, "john_doe").await;
    let post = state.posts.create(&author, "title", "body").await.unwrap();

    let err = state
        .comments
        .create(post.id, &author, "", false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn processed_content_follows_the_markdown_flag() {
    let state = memory_state();
    let author = registered(&state, "john_doe").await;
    let post = state.posts.create(&author, "title", "body").await.unwrap();

    let plain = state
        .comments
        .create(post.id, &author, "just **text**", false)
        .await
        .unwrap();
    assert_eq!(plain.processed_content, plain.content);

    let rendered = state
        .comments
        .create(post.id, &author, "some **bold** text", true)
        .await
        .unwrap();
    assert_eq!(rendered.content, "some **bold** text");
    assert!(rendered.processed_content.contains("<strong>bold</strong>"));
}

#[tokio::test]
async fn list_is_newest_first_with_authors_resolved() {
    let state = memory_state();
    let author = registered(&state, "john_doe").await;
    let commenter = registered(&state, "jane_smith").await;
    let post = state.posts.create(&author, "title", "body").await.unwrap();

    state
        .comments
        .create(post.id, &author, "first", false)
        .await
        .unwrap();
    state
        .comments
        .create(post.id, &commenter, "second", false)
        .await
        .unwrap();

    let listed = state.comments.list(post.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].content, "second");
    assert_eq!(listed[0].author.username, "jane_smith");
    assert_eq!(listed[1].content, "first");
    assert_eq!(listed[1].author.username, "john_doe");
}

#[tokio::test]
async fn update_is_author_only_and_merges_sparsely() {
    let state = memory_state();
    let post_owner = registered(&state, "john_doe").await;
    let commenter = registered(&state, "jane_smith").await;
    let impostor = registered(&state, "alex_tech").await;
    let post = state
        .posts
        .create(&post_owner, "title", "body")
        .await
        .unwrap();
    let comment = state
        .comments
        .create(post.id, &commenter, "original", true)
        .await
        .unwrap();

    // Neither the post owner nor a third party may update.
    for actor in [&post_owner, &impostor] {
        let err = state
            .comments
            .update(post.id, comment.id, actor, CommentPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not authorized to update this comment");
    }

    // Content changes only when non-empty; the flag only when provided.
    let updated = state
        .comments
        .update(
            post.id,
            comment.id,
            &commenter,
            CommentPatch {
                content: Some("revised".into()),
                is_markdown: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "revised");
    assert!(updated.is_markdown);

    let flag_off = state
        .comments
        .update(
            post.id,
            comment.id,
            &commenter,
            CommentPatch {
                content: Some(String::new()),
                is_markdown: Some(false),
            },
        )
        .await
        .unwrap();
    assert_eq!(flag_off.content, "revised");
    assert!(!flag_off.is_markdown);
    assert_eq!(flag_off.processed_content, "revised");
}

#[tokio::test]
async fn membership_is_checked_against_the_posts_own_list() {
    let state = memory_state();
    let author = registered(&state, "john_doe").await;
    let first = state.posts.create(&author, "first", "body").await.unwrap();
    let second = state.posts.create(&author, "second", "body").await.unwrap();
    let comment = state
        .comments
        .create(first.id, &author, "on the first post", false)
        .await
        .unwrap();

    // The comment exists, but not on that post.
    let err = state
        .comments
        .update(second.id, comment.id, &author, CommentPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Comment not found on this post");

    let err = state
        .comments
        .delete(second.id, comment.id, author.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Comment not found on this post");

    let err = state
        .comments
        .update(first.id, uuid::Uuid::new_v4(), &author, CommentPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Comment not found on this post");
}

#[tokio::test]
async fn delete_follows_the_two_owner_rule() {
    let (state, store) = memory_app();
    let post_owner = registered(&state, "john_doe").await;
    let commenter = registered(&state, "jane_smith").await;
    let impostor = registered(&state, "alex_tech").await;
    let post = state
        .posts
        .create(&post_owner, "title", "body")
        .await
        .unwrap();

    // A third party may not delete.
    let comment = state
        .comments
        .create(post.id, &commenter, "hello", false)
        .await
        .unwrap();
    let err = state
        .comments
        .delete(post.id, comment.id, impostor.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Not authorized to delete this comment");

    // The comment's own author may.
    state
        .comments
        .delete(post.id, comment.id, commenter.id)
        .await
        .unwrap();

    // So may the post's author, and both sides of the link are cleaned up.
    let comment = state
        .comments
        .create(post.id, &commenter, "again", false)
        .await
        .unwrap();
    state
        .comments
        .delete(post.id, comment.id, post_owner.id)
        .await
        .unwrap();

    let stored_post = PostRepo::find_by_id(store.as_ref(), post.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored_post.comments.is_empty());
    assert!(CommentRepo::find_by_id(store.as_ref(), comment.id)
        .await
        .unwrap()
        .is_none());
}
