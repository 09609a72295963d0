//! Integration tests for the WordPress resource client.
//!
//! Each test stands up a local mock server and asserts the exact request
//! shape (path, query, headers, body) a resource method produces, plus the
//! normalization of the response.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use wp_connect::{
    CommentListParams, MediaMetadata, NewPost, PostListParams, PostUpdate, WordPressClient,
    WpError,
};

fn client_for(server: &ServerGuard) -> WordPressClient {
    WordPressClient::builder()
        .base_url(server.url())
        .basic_auth("user", "pass")
        .build()
        .expect("client builds")
}

#[test]
fn get_posts_sends_pagination_and_status_only() {
    let mut server = Server::new();
    // Query given with the path is matched exactly: no stray search/categories/tags keys.
    let mock = server
        .mock("GET", "/wp/v2/posts?per_page=5&page=2&status=publish")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1}]"#)
        .create();

    let client = client_for(&server);
    let posts = client
        .get_posts(&PostListParams::default().limit(5).page(2))
        .unwrap();

    mock.assert();
    assert_eq!(posts[0]["id"], 1);
}

#[test]
fn get_posts_includes_filters_when_set() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/wp/v2/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "rust".into()),
            Matcher::UrlEncoded("categories".into(), "3,14".into()),
            Matcher::UrlEncoded("tags".into(), "7".into()),
            Matcher::UrlEncoded("status".into(), "draft".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create();

    let client = client_for(&server);
    client
        .get_posts(
            &PostListParams::default()
                .status("draft")
                .search("rust")
                .categories(vec![3, 14])
                .tags(vec![7]),
        )
        .unwrap();

    mock.assert();
}

#[test]
fn get_post_hits_the_id_endpoint() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/wp/v2/posts/7")
        .with_status(200)
        .with_body(r#"{"id": 7}"#)
        .create();

    let client = client_for(&server);
    let post = client.get_post(7).unwrap();

    mock.assert();
    assert_eq!(post["id"], 7);
}

#[test]
fn create_post_sends_exactly_the_set_fields() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/wp/v2/posts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "title": "T",
            "content": "C",
            "status": "draft"
        })))
        .with_status(201)
        .with_body(r#"{"id": 10, "status": "draft"}"#)
        .create();

    let client = client_for(&server);
    let created = client.create_post(&NewPost::new("T", "C")).unwrap();

    mock.assert();
    assert_eq!(created["id"], 10);
}

#[test]
fn update_post_sends_a_partial_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/wp/v2/posts/7")
        .match_body(Matcher::Json(json!({"title": "New"})))
        .with_status(200)
        .with_body(r#"{"id": 7, "title": {"raw": "New"}}"#)
        .create();

    let client = client_for(&server);
    client
        .update_post(7, &PostUpdate::default().title("New"))
        .unwrap();

    mock.assert();
}

#[test]
fn delete_post_sends_force_as_string() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/wp/v2/posts/7?force=true")
        .with_status(200)
        .with_body(r#"{"deleted": true}"#)
        .create();

    let client = client_for(&server);
    let outcome = client.delete_post(7, true).unwrap();

    mock.assert();
    assert_eq!(outcome["deleted"], true);
}

#[test]
fn delete_post_tolerates_an_empty_body() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/wp/v2/posts/7?force=false")
        .with_status(200)
        .create();

    let client = client_for(&server);
    let outcome = client.delete_post(7, false).unwrap();

    mock.assert();
    assert_eq!(outcome, json!({}));
}

#[test]
fn taxonomy_and_user_lists_paginate() {
    let mut server = Server::new();
    let categories = server
        .mock("GET", "/wp/v2/categories?per_page=10&page=1")
        .with_status(200)
        .with_body("[]")
        .create();
    let tags = server
        .mock("GET", "/wp/v2/tags?per_page=25&page=3")
        .with_status(200)
        .with_body("[]")
        .create();
    let users = server
        .mock("GET", "/wp/v2/users?per_page=10&page=1")
        .with_status(200)
        .with_body("[]")
        .create();

    let client = client_for(&server);
    client.get_categories(&Default::default()).unwrap();
    client
        .get_tags(&wp_connect::ListParams::default().limit(25).page(3))
        .unwrap();
    client.get_users(&Default::default()).unwrap();

    categories.assert();
    tags.assert();
    users.assert();
}

#[test]
fn comments_filter_by_post_only_when_set() {
    let mut server = Server::new();
    let unfiltered = server
        .mock("GET", "/wp/v2/comments?per_page=10&page=1")
        .with_status(200)
        .with_body("[]")
        .create();
    let filtered = server
        .mock("GET", "/wp/v2/comments?per_page=10&page=1&post=7")
        .with_status(200)
        .with_body("[]")
        .create();

    let client = client_for(&server);
    client.get_comments(&CommentListParams::default()).unwrap();
    client
        .get_comments(&CommentListParams::default().post(7))
        .unwrap();

    unfiltered.assert();
    filtered.assert();
}

#[test]
fn get_me_sends_basic_authorization() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/wp/v2/users/me")
        // base64("user:pass")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(200)
        .with_body(r#"{"id": 1, "name": "user"}"#)
        .create();

    let client = client_for(&server);
    let me = client.get_me().unwrap();

    mock.assert();
    assert_eq!(me["name"], "user");
}

#[test]
fn bearer_token_is_sent_when_no_basic_pair() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/wp/v2/users/me")
        .match_header("authorization", "Bearer tok123")
        .with_status(200)
        .with_body(r#"{"id": 1}"#)
        .create();

    let client = WordPressClient::builder()
        .base_url(server.url())
        .bearer_token("tok123")
        .build()
        .unwrap();
    client.get_me().unwrap();

    mock.assert();
}

#[test]
fn api_errors_carry_status_and_json_details() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/wp/v2/users/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"rest_not_logged_in","message":"You are not currently logged in."}"#)
        .create();

    let client = client_for(&server);
    let err = client.get_me().unwrap_err();

    match err {
        WpError::Api {
            status,
            ref message,
            ref details,
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "You are not currently logged in.");
            assert_eq!(
                details.as_ref().unwrap()["code"],
                "rest_not_logged_in"
            );
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_auth_error());
}

#[test]
fn non_json_error_bodies_become_the_message() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/wp/v2/posts/1")
        .with_status(502)
        .with_body("upstream exploded")
        .create();

    let client = client_for(&server);
    match client.get_post(1).unwrap_err() {
        WpError::Api {
            status,
            message,
            details,
        } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream exploded");
            assert!(details.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn upload_media_posts_bytes_then_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sunset.png");
    std::fs::write(&file, b"png bytes here").unwrap();

    let mut server = Server::new();
    let upload = server
        .mock("POST", "/wp/v2/media")
        .match_header("content-type", "image/png")
        .match_header(
            "content-disposition",
            "attachment; filename=\"sunset.png\"",
        )
        .match_body("png bytes here")
        .with_status(201)
        .with_body(r#"{"id": 42}"#)
        .create();
    let metadata = server
        .mock("POST", "/wp/v2/media/42")
        .match_body(Matcher::Json(json!({
            "title": "Sunset",
            "alt_text": "A sunset over the sea"
        })))
        .with_status(200)
        .with_body(r#"{"id": 42, "title": {"raw": "Sunset"}}"#)
        .create();

    let client = client_for(&server);
    let media = client
        .upload_media(
            &file,
            &MediaMetadata::default()
                .title("Sunset")
                .alt_text("A sunset over the sea"),
        )
        .unwrap();

    upload.assert();
    metadata.assert();
    assert_eq!(media["title"]["raw"], "Sunset");
}

#[test]
fn upload_media_without_metadata_is_a_single_call() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.xyzzy");
    std::fs::write(&file, b"mystery bytes").unwrap();

    let mut server = Server::new();
    let upload = server
        .mock("POST", "/wp/v2/media")
        .match_header("content-type", "application/octet-stream")
        .with_status(201)
        .with_body(r#"{"id": 43}"#)
        .create();

    let client = client_for(&server);
    let media = client.upload_media(&file, &MediaMetadata::default()).unwrap();

    upload.assert();
    assert_eq!(media["id"], 43);
}

#[test]
fn upload_metadata_failure_surfaces_without_rollback() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("photo.jpg");
    std::fs::write(&file, b"jpeg bytes").unwrap();

    let mut server = Server::new();
    let upload = server
        .mock("POST", "/wp/v2/media")
        .match_header("content-type", "image/jpeg")
        .with_status(201)
        .with_body(r#"{"id": 44}"#)
        .create();
    let metadata = server
        .mock("POST", "/wp/v2/media/44")
        .with_status(500)
        .with_body("metadata update failed")
        .create();
    // The client must not try to compensate by deleting the upload.
    let rollback = server
        .mock("DELETE", Matcher::Regex(r"^/wp/v2/media/44".into()))
        .expect(0)
        .create();

    let client = client_for(&server);
    let err = client
        .upload_media(&file, &MediaMetadata::default().caption("c"))
        .unwrap_err();

    upload.assert();
    metadata.assert();
    rollback.assert();
    assert_eq!(err.status(), Some(500));
}
