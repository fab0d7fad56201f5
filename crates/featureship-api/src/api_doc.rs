//! OpenAPI documentation.
//!
//! Handler annotations use paths relative to the versioned prefix; the
//! `servers` entry carries the `/api/v0` base so the rendered docs hit the
//! right URLs.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use featureship_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feature Ship API",
        version = "0.1.0",
        description = "Customer feedback API: feedback posts with upvotes, comments, \
                       tags, and types, scoped to companies. All endpoints are versioned \
                       under /api/v0/."
    ),
    servers((url = "/api/v0")),
    paths(
        handlers::health::health_check,
        // Posts
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::toggle_upvote,
        handlers::posts::update_status,
        handlers::posts::replace_tags,
        handlers::posts::replace_types,
        // Comments
        handlers::comments::create_comment,
        handlers::comments::list_comments,
        // Tags
        handlers::tags::create_tag,
        handlers::tags::list_tags,
        handlers::tags::update_tag,
        handlers::tags::delete_tag,
        // Types
        handlers::types::create_type,
        handlers::types::list_types,
        handlers::types::update_type,
        handlers::types::delete_type,
        // Companies
        handlers::companies::create_company,
        handlers::companies::list_companies,
        handlers::companies::delete_company,
        handlers::companies::list_audit_logs,
        // Organizations
        handlers::organizations::create_organization,
        handlers::organizations::list_organizations,
        handlers::organizations::delete_organization,
    ),
    components(schemas(
        error::ErrorResponse,
        models::FeedbackPost,
        models::FeedbackStatus,
        models::CreatePostRequest,
        models::UpdateStatusRequest,
        models::UpdateLabelsRequest,
        models::FeedbackComment,
        models::CreateCommentRequest,
        models::FeedbackTag,
        models::CreateTagRequest,
        models::UpdateTagRequest,
        models::FeedbackType,
        models::CreateTypeRequest,
        models::UpdateTypeRequest,
        models::Company,
        models::CreateCompanyRequest,
        models::Organization,
        models::CreateOrganizationRequest,
        models::AuditLog,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "posts", description = "Feedback posts"),
        (name = "comments", description = "Post comments"),
        (name = "tags", description = "Feedback tags"),
        (name = "types", description = "Feedback types"),
        (name = "companies", description = "Companies and audit logs"),
        (name = "organizations", description = "Organizations")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
