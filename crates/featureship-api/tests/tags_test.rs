mod helpers;

use helpers::{parse_id, spawn_app};
use serde_json::json;

#[tokio::test]
async fn tag_lifecycle_with_post_cleanup() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    // Create a tag and attach it to a post.
    let response = app
        .server
        .post("/api/v0/tags")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "Bug", "color": "#ff0000" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let tag_id = parse_id(&response.json::<serde_json::Value>());

    let response = app
        .server
        .post("/api/v0/posts")
        .authorization_bearer(&token)
        .json(&json!({
            "company_id": company_id,
            "title": "Dark mode",
            "description": "Please add dark mode",
            "tags": [tag_id],
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let post_id = parse_id(&response.json::<serde_json::Value>());

    // Rename the tag.
    let response = app
        .server
        .patch(&format!("/api/v0/tags/{}", tag_id))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Defect" }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["name"], "Defect");

    // Delete it; the post must no longer reference it.
    let response = app
        .server
        .delete(&format!("/api/v0/tags/{}", tag_id))
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
    assert_eq!(post["tags"].as_array().map(Vec::len), Some(0));

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
    assert!(actions.contains(&"tag.update".to_string()));
    assert!(actions.contains(&"tag.delete".to_string()));
}

#[tokio::test]
async fn tag_mutations_require_auth() {
    let app = spawn_app().await;

    let response = app
        .server
        .patch(&format!("/api/v0/tags/{}", uuid::Uuid::new_v4()))
        .json(&json!({ "name": "x" }))
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .server
        .delete(&format!("/api/v0/tags/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn non_member_cannot_mutate_tags() {
    let app = spawn_app().await;
    let (_owner_id, owner_token) = app.create_user("Owner").await;
    let company_id = app.create_company(&owner_token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/tags")
        .authorization_bearer(&owner_token)
        .json(&json!({ "company_id": company_id, "name": "Bug", "color": "#ff0000" }))
        .await;
    let tag_id = parse_id(&response.json::<serde_json::Value>());

    let (_other_id, other_token) = app.create_user("Other").await;

    let response = app
        .server
        .delete(&format!("/api/v0/tags/{}", tag_id))
        .authorization_bearer(&other_token)
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .patch(&format!("/api/v0/tags/{}", tag_id))
        .authorization_bearer(&other_token)
        .json(&json!({ "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn default_tags_are_read_only() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;
    let default_tag_id = app.create_default_tag("Feature Request").await;

    // Defaults show up in the company's tag list.
    let response = app
        .server
        .get("/api/v0/tags")
        .authorization_bearer(&token)
        .add_query_param("company_id", company_id)
        .await;
    assert_eq!(response.status_code(), 200);
    let names: Vec<String> = response
        .json::<serde_json::Value>()
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(names.contains(&"Feature Request".to_string()));

    // But cannot be modified or deleted.
    let response = app
        .server
        .patch(&format!("/api/v0/tags/{}", default_tag_id))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Renamed" }))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .delete(&format!("/api/v0/tags/{}", default_tag_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn duplicate_tag_names_conflict_case_insensitively() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/tags")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "Bug", "color": "#ff0000" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = app
        .server
        .post("/api/v0/tags")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "bug", "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn empty_patch_and_missing_tag_rejected() {
    let app = spawn_app().await;
    let (_user_id, token) = app.create_user("Ada").await;
    let company_id = app.create_company(&token, "Acme").await;

    let response = app
        .server
        .post("/api/v0/tags")
        .authorization_bearer(&token)
        .json(&json!({ "company_id": company_id, "name": "Bug", "color": "#ff0000" }))
        .await;
    let tag_id = parse_id(&response.json::<serde_json::Value>());

    let response = app
        .server
        .patch(&format!("/api/v0/tags/{}", tag_id))
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .delete(&format!("/api/v0/tags/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}
