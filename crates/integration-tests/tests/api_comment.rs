//! The nested /posts/{id}/comments surface: rendering, the membership
//! check, and the two-owner deletion policy end to end.

use axum::http::{Method, StatusCode};
use serde_json::json;

use integration_tests::{create_comment, create_post, register, send, test_app};

#[tokio::test]
async fn comments_render_markdown_on_read() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "john_doe").await;
    let post_id = create_post(&app, &token, "Hello").await;

    create_comment(&app, &token, &post_id, "plain **stars**", false).await;
    create_comment(&app, &token, &post_id, "real **bold**", true).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/posts/{post_id}/comments"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comments = body.as_array().unwrap();
    assert_eq!(comments.len(), 2);

    // Newest first: the markdown comment is listed before the plain one.
    assert_eq!(comments[0]["content"], "real **bold**");
    assert!(comments[0]["processed_content"]
        .as_str()
        .unwrap()
        .contains("<strong>bold</strong>"));
    assert_eq!(comments[1]["content"], "plain **stars**");
    assert_eq!(comments[1]["processed_content"], "plain **stars**");
}

#[tokio::test]
async fn commenting_on_a_missing_post_is_404() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "john_doe").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/posts/{}/comments", uuid::Uuid::new_v4()),
        Some(&token),
        Some(json!({ "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn membership_is_checked_through_the_post_path() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "john_doe").await;
    let first = create_post(&app, &token, "first").await;
    let second = create_post(&app, &token, "second").await;
    let comment = create_comment(&app, &token, &first, "on the first", false).await;

    // The comment exists, just not under that post.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/posts/{second}/comments/{comment}"),
        Some(&token),
        Some(json!({ "content": "moved?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found on this post");
}

#[tokio::test]
async fn update_is_author_only_and_flag_changes_need_to_be_explicit() {
    let (app, _) = test_app();
    let (_, owner) = register(&app, "john_doe").await;
    let (_, commenter) = register(&app, "jane_smith").await;
    let post_id = create_post(&app, &owner, "Hello").await;
    let comment = create_comment(&app, &commenter, &post_id, "**draft**", true).await;

    // The post owner may delete comments, but not edit them.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/posts/{post_id}/comments/{comment}"),
        Some(&owner),
        Some(json!({ "content": "overwritten" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to update this comment");

    // Updating the content alone leaves the markdown flag as it was.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/posts/{post_id}/comments/{comment}"),
        Some(&commenter),
        Some(json!({ "content": "**final**" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "**final**");
    assert_eq!(body["is_markdown"], true);
    assert!(body["processed_content"]
        .as_str()
        .unwrap()
        .contains("<strong>final</strong>"));
}

#[tokio::test]
async fn deletion_follows_the_two_owner_rule_end_to_end() {
    let (app, _) = test_app();
    let (_, owner) = register(&app, "user_a").await;
    let (_, commenter) = register(&app, "user_b").await;
    let (_, bystander) = register(&app, "user_c").await;

    let post_id = create_post(&app, &owner, "A's post").await;
    let comment = create_comment(&app, &commenter, &post_id, "B's comment", false).await;

    // Neither author: 403.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/posts/{post_id}/comments/{comment}"),
        Some(&bystander),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to delete this comment");

    // The post's author: 200, and the comment is gone from both stores.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/posts/{post_id}/comments/{comment}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted successfully");

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/posts/{post_id}/comments"),
        None,
        None,
    )
    .await;
    assert_eq!(body, json!([]));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/posts/{post_id}/comments/{comment}"),
        Some(&commenter),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
