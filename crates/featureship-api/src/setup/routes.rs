//! Route configuration and setup

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use featureship_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::auth::require_auth;
use crate::constants::API_PREFIX;
use crate::handlers::{comments, companies, health, organizations, posts, tags, types};
use crate::middleware::log_mutations;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_CONCURRENCY_LIMIT: usize = 10_000;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: AppState) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Every route except the health check requires a bearer token. The
    // mutation log runs inside auth so it sees the caller's identity.
    let protected_routes = Router::new()
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/posts/{id}/upvote", post(posts::toggle_upvote))
        .route("/posts/{id}/status", patch(posts::update_status))
        .route("/posts/{id}/tags", put(posts::replace_tags))
        .route("/posts/{id}/types", put(posts::replace_types))
        .route(
            "/posts/{id}/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
        .route("/tags", post(tags::create_tag).get(tags::list_tags))
        .route("/tags/{id}", patch(tags::update_tag).delete(tags::delete_tag))
        .route("/types", post(types::create_type).get(types::list_types))
        .route(
            "/types/{id}",
            patch(types::update_type).delete(types::delete_type),
        )
        .route(
            "/companies",
            post(companies::create_company).get(companies::list_companies),
        )
        .route("/companies/{id}", delete(companies::delete_company))
        .route("/companies/{id}/audit-logs", get(companies::list_audit_logs))
        .route(
            "/organizations",
            post(organizations::create_organization).get(organizations::list_organizations),
        )
        .route(
            "/organizations/{id}",
            delete(organizations::delete_organization),
        )
        .layer(axum::middleware::from_fn(log_mutations))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(protected_routes)
        .with_state(state);

    let docs: Router = utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
        .path("/docs")
        .into();

    // Server-level concurrency cap against resource exhaustion under load.
    let concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY_LIMIT)
        .max(1);

    let app = Router::new()
        .nest(API_PREFIX, api_routes)
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(docs)
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Build the CORS layer from configured origins. `*` means any origin, which
/// `Config::from_env` already rejects in production.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::PUT,
        Method::DELETE,
    ];

    if config.cors_origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}
