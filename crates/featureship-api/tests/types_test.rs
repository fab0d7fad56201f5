mod helpers;

use helpers::{parse_id, spawn_app};
use serde_json::json;

#[tokio::test]
async fn type_lifecycle_with_post_cleanup() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    // Create a type and attach it to a post.
    let response = app
        .server
        .post("/api/v0/types")
        .authorization_bearer(&token)
        .json(&json!({
            "company_id": company_id,
            "name": "Feature",
            "color": "#0000ff",
            "emoji": "💡",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let created = response.json::<serde_json::Value>();
    assert_eq!(created["emoji"], "💡");
    let type_id = parse_id(&created);

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({
            "company_id": company_id,
            "title": "Dark mode",
            "description": "Please add dark mode",
            "types": [type_id],
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let post_id = parse_id(&response.json::<serde_json::Value>());

    // Patch name and emoji.
    let response = app
        .server
        .patch(&format!("/api/v0/types/{}", type_id))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Idea", "emoji": "✨" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let patched = response.json::<serde_json::Value>();
    assert_eq!(patched["name"], "Idea");
    assert_eq!(patched["emoji"], "✨");

    // Delete it; the post must no longer reference it.
    let response = app
        .server
        .delete(&format!("/api/v0/types/{}", type_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["success"], true);

    let response = app
        .server
        .get(&format!("/api/v0/posts/{}", post_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let post = response.json::<serde_json::Value>();
    assert_eq!(post["types"].as_array().map(Vec::len), Some(0));

    // Both mutations left audit entries.
    let response = app
        .server
        .get(&format!("/api/v0/companies/{}/audit-logs", company_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let actions: Vec<String> = response
        .json::<serde_json::Value>()
        .as_array()
        .expect("array")
        .iter()
        .map(|log| log["action"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(actions.contains(&"type.update".to_string()));
    assert!(actions.contains(&"type.delete".to_string()));
}

#[tokio::test]
async fn non_member_cannot_mutate_types() {
    let app = spawn_app().await;
    let (_owner_id, owner_token) = app.create_user("Owner").await;
    let company_id = app.create_company(&owner_token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/types")
        .authorization_bearer(&owner_token)
        .json(&json!({ "company_id": company_id, "name": "Feature", "color": "#0000ff" }))
        .await;
    let type_id = parse_id(&response.json::<serde_json::Value>());

    let (_other_id, other_token) = app.create_user("Other").await;

    let response = app
        .server
        .patch(&format!("/api/v0/types/{}", type_id))
        .authorization_bearer(&other_token)
        .json(&json!({ "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .delete(&format!("/api/v0/types/{}", type_id))
        .authorization_bearer(&other_token)
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn duplicate_type_names_conflict_case_insensitively() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/types")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "Feature", "color": "#0000ff" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = app
        .server
        .post("/api/v0/types")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "feature", "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn empty_patch_and_missing_type_rejected() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/types")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "Feature", "color": "#0000ff" }))
        .await;
    let type_id = parse_id(&response.json::<serde_json::Value>());

    let response = app
        .server
        .patch(&format!("/api/v0/types/{}", type_id))
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .delete(&format!("/api/v0/types/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}
