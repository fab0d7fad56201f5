//! Application state shared across handlers.
//!
//! `AppState` is cheap to clone: every repository holds a `PgPool`, which is
//! itself a cheaply-clonable handle.

use featureship_core::Config;
use featureship_db::{
    AuditLogRepository, CommentRepository, CompanyRepository, OrganizationRepository,
    PostRepository, TagRepository, TypeRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
    pub users: UserRepository,
    pub companies: CompanyRepository,
    pub organizations: OrganizationRepository,
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub tags: TagRepository,
    pub types: TypeRepository,
    pub audit_logs: AuditLogRepository,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool: pool.clone(),
            users: UserRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool.clone()),
            organizations: OrganizationRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            tags: TagRepository::new(pool.clone()),
            types: TypeRepository::new(pool.clone()),
            audit_logs: AuditLogRepository::new(pool),
        }
    }
}
