//! Control-plane repositories: companies, organizations, users, audit logs.

mod audit_log;
mod company;
mod organization;
mod user;

pub use audit_log::AuditLogRepository;
pub use company::CompanyRepository;
pub use organization::OrganizationRepository;
pub use user::UserRepository;
