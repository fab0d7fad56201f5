pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{decode_token, encode_token, JwtClaims};
pub use middleware::require_auth;
pub use models::AuthContext;
