//! Blog post endpoints

mod common;

use common::{create_test_server, login, register, seed_admin, session, session_cookie};
use folio_core::Storage;
use serde_json::{json, Value};

#[tokio::test]
async fn test_publish_as_anonymous_and_as_user() {
    let (server, _, _) = create_test_server();

    let response = server
        .post("/api/posts")
        .json(&json!({ "title": "Hello", "content": "First post" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["post"]["author"], "Anonymous");

    let cookie = register(&server, "ada", "secret", "ada@example.com").await;
    let response = server
        .post("/api/posts")
        .add_cookie(session_cookie(&cookie))
        .json(&json!({ "title": "Notes", "content": "On the engine" }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["post"]["author"], "ada");
    assert!(body["post"]["id"].is_i64());
    assert!(body["post"]["date"].is_string());
}

#[tokio::test]
async fn test_blank_title_rejected() {
    let (server, _, storage) = create_test_server();

    let response = server
        .post("/api/posts")
        .json(&json!({ "title": "  ", "content": "Body" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["reason"], "Title and content are required");
    assert!(storage.get_item("blogPosts").unwrap().is_none());
}

#[tokio::test]
async fn test_list_defaults_to_three_newest() {
    let (server, _, storage) = create_test_server();
    let posts: Vec<Value> = (1..=5)
        .map(|day| {
            json!({
                "id": day,
                "title": format!("day {day}"),
                "content": "body",
                "date": format!("2024-06-0{day}T09:00:00Z"),
                "author": "Anonymous"
            })
        })
        .collect();
    storage
        .set_item("blogPosts", &Value::Array(posts).to_string())
        .unwrap();

    let response = server.get("/api/posts").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["day 5", "day 4", "day 3"]);

    let response = server.get("/api/posts").add_query_param("limit", 10).await;
    let body: Value = response.json();
    assert_eq!(body["posts"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_delete_requires_admin_session() {
    let (server, _, storage) = create_test_server();
    let response = server
        .post("/api/posts")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    let body: Value = response.json();
    let id = body["post"]["id"].as_i64().unwrap();

    // No session
    let response = server.delete(&format!("/api/posts/{id}")).await;
    assert_eq!(response.status_code(), 403);

    // Ordinary account
    let ada = register(&server, "ada", "secret", "ada@example.com").await;
    let response = server
        .delete(&format!("/api/posts/{id}"))
        .add_cookie(session_cookie(&ada))
        .await;
    assert_eq!(response.status_code(), 403);

    // Admin account
    seed_admin(&storage, "root", "toor");
    let root = login(&server, "root", "toor").await;
    assert_eq!(session(&server, Some(&root)).await["user"]["is_admin"], true);

    let response = server
        .delete(&format!("/api/posts/{id}"))
        .add_cookie(session_cookie(&root))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = server
        .delete(&format!("/api/posts/{id}"))
        .add_cookie(session_cookie(&root))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["reason"], "Post not found");
}

#[tokio::test]
async fn test_admin_login_does_not_authorize_other_clients() {
    let (server, _, storage) = create_test_server();
    seed_admin(&storage, "root", "toor");
    login(&server, "root", "toor").await;

    let response = server
        .post("/api/posts")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["post"]["author"], "Anonymous");
    let id = body["post"]["id"].as_i64().unwrap();

    let response = server.delete(&format!("/api/posts/{id}")).await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(session(&server, None).await["authenticated"], false);
}

#[tokio::test]
async fn test_bad_post_id_uses_error_envelope() {
    let (server, _, _) = create_test_server();

    let response = server.delete("/api/posts/abc").await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn test_unreadable_post_is_skipped_not_erased() {
    let (server, _, storage) = create_test_server();
    let raw = json!([
        {
            "id": 1,
            "title": "Kept",
            "content": "body",
            "date": "2024-06-01T09:00:00Z",
            "author": "Anonymous"
        },
        {
            "id": 2,
            "title": "Typo",
            "content": "body",
            "date": "2024-06-02",
            "author": "Anonymous"
        }
    ])
    .to_string();
    storage.set_item("blogPosts", &raw).unwrap();

    let response = server.get("/api/posts").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Kept");
    assert_eq!(storage.get_item("blogPosts").unwrap(), Some(raw));
}

#[tokio::test]
async fn test_corrupted_posts_list_reads_empty() {
    let (server, _, storage) = create_test_server();
    storage.set_item("blogPosts", "\"oops\"").unwrap();

    let response = server.get("/api/posts").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["posts"].as_array().unwrap().is_empty());
    assert_eq!(storage.get_item("blogPosts").unwrap().as_deref(), Some("[]"));
}
