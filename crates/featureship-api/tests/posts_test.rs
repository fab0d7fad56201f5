mod helpers;

use helpers::{parse_id, spawn_app};
use serde_json::json;

#[tokio::test]
async fn new_posts_start_under_review_with_zero_counts() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({
            "company_id": company_id,
            "title": "  Dark mode  ",
            "description": "Please add dark mode",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let post = response.json::<serde_json::Value>();

    assert_eq!(post["status"], "Under Review");
    assert_eq!(post["title"], "Dark mode");
    assert_eq!(post["upvotes_count"], 0);
    assert_eq!(post["comments_count"], 0);
    assert_eq!(post["user_name"], "Ada");
}

#[tokio::test]
async fn blank_post_fields_rejected() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "title": "   ", "description": "x" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "title": "x", "description": "" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn upvote_toggle_is_an_involution() {
    let app = spawn_app().await;
    let (ada_id, ada_token) = app.create_user("Ada").await;
    let (bob_id, bob_token) = app.create_user("Bob").await;
    let company_id = app.create_company(&ada_token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&ada_token)
        .json(&json!({ "company_id": company_id, "title": "Dark mode", "description": "d" }))
        .await;
    let post_id = parse_id(&response.json::<serde_json::Value>());
    let upvote_path = format!("/api/v0/posts/{}/upvote", post_id);

    let response = app
        .server
        .post(&upvote_path)
        .authorization_bearer(&ada_token)
        .await;
    let post = response.json::<serde_json::Value>();
    assert_eq!(post["upvotes_count"], 1);

    let response = app
        .server
        .post(&upvote_path)
        .authorization_bearer(&bob_token)
        .await;
    let post = response.json::<serde_json::Value>();
    assert_eq!(post["upvotes_count"], 2);
    let upvotes: Vec<String> = post["upvotes"]
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect();
    assert!(upvotes.contains(&ada_id.to_string()));
    assert!(upvotes.contains(&bob_id.to_string()));
    // Count always matches the set.
    assert_eq!(post["upvotes_count"].as_i64(), Some(upvotes.len() as i64));

    // Toggling again removes only the caller's vote.
    let response = app
        .server
        .post(&upvote_path)
        .authorization_bearer(&ada_token)
        .await;
    let post = response.json::<serde_json::Value>();
    assert_eq!(post["upvotes_count"], 1);
    let upvotes = post["upvotes"].as_array().expect("array");
    assert_eq!(upvotes.len(), 1);
    assert_eq!(upvotes[0], bob_id.to_string());
}

#[tokio::test]
async fn comments_bump_the_post_counter() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "title": "Dark mode", "description": "d" }))
        .await;
    let post_id = parse_id(&response.json::<serde_json::Value>());
    let comments_path = format!("/api/v0/posts/{}/comments", post_id);

    for content in ["First!", "Second"] {
        let response = app
            .server
            .post(&comments_path)
            .authorization_bearer(&token)
            .json(&json!({ "content": content }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = app
        .server
        .get(&format!("/api/v0/posts/{}", post_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.json::<serde_json::Value>()["comments_count"], 2);

    // Oldest first.
    let response = app
        .server
        .get(&comments_path)
        .authorization_bearer(&token)
        .await;
    let comments = response.json::<serde_json::Value>();
    let comments = comments.as_array().expect("array");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "First!");
    assert_eq!(comments[1]["content"], "Second");

    // Missing post is a 404, and empty comments are rejected.
    let response = app
        .server
        .post(&format!("/api/v0/posts/{}/comments", uuid::Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({ "content": "hello" }))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = app
        .server
        .post(&comments_path)
        .authorization_bearer(&token)
        .json(&json!({ "content": "   " }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn only_members_can_triage() {
    let app = spawn_app().await;
    let (_owner_id, owner_token) = app.create_user("Owner").await;
    let (_visitor_id, visitor_token) = app.create_user("Visitor").await;
    let company_id = app.create_company(&owner_token, "Acme").await;

    // Visitors can submit posts but not change status.
    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&visitor_token)
        .json(&json!({ "company_id": company_id, "title": "Dark mode", "description": "d" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let post_id = parse_id(&response.json::<serde_json::Value>());
    let status_path = format!("/api/v0/posts/{}/status", post_id);

    let response = app
        .server
        .patch(&status_path)
        .authorization_bearer(&visitor_token)
        .json(&json!({ "status": "Planned" }))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .patch(&status_path)
        .authorization_bearer(&owner_token)
        .json(&json!({ "status": "Planned" }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["status"], "Planned");
}

#[tokio::test]
async fn list_filters_by_status_and_since() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    for title in ["One", "Two"] {
        let response = app
            .server
            .post("/api/v0/posts")
            .authorization_bearer(&token)
            .json(&json!({ "company_id": company_id, "title": title, "description": "d" }))
            .await;
        assert_eq!(response.status_code(), 201);
        if title == "Two" {
            let post_id = parse_id(&response.json::<serde_json::Value>());
            app.server
                .patch(&format!("/api/v0/posts/{}/status", post_id))
                .authorization_bearer(&token)
                .json(&json!({ "status": "Accepted" }))
                .await;
        }
    }

    let response = app
        .server
        .get("/api/v0/posts")
        .authorization_bearer(&token)
        .add_query_param("company_id", company_id)
        .add_query_param("status", "Accepted")
        .await;
    assert_eq!(response.status_code(), 200);
    let posts = response.json::<serde_json::Value>();
    let posts = posts.as_array().expect("array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Two");

    // Epoch-seconds `since` in the past returns everything; far future, nothing.
    let response = app
        .server
        .get("/api/v0/posts")
        .authorization_bearer(&token)
        .add_query_param("company_id", company_id)
        .add_query_param("since", "1000000000")
        .await;
    assert_eq!(
        response.json::<serde_json::Value>().as_array().map(Vec::len),
        Some(2)
    );

    let response = app
        .server
        .get("/api/v0/posts")
        .authorization_bearer(&token)
        .add_query_param("company_id", company_id)
        .add_query_param("since", "2100-01-01T00:00:00Z")
        .await;
    assert_eq!(
        response.json::<serde_json::Value>().as_array().map(Vec::len),
        Some(0)
    );

    // Garbage timestamps are a client error.
    let response = app
        .server
        .get("/api/v0/posts")
        .authorization_bearer(&token)
        .add_query_param("company_id", company_id)
        .add_query_param("since", "next tuesday")
        .await;
    assert_eq!(response.status_code(), 400);
}
