pub mod comments;
pub mod companies;
pub mod health;
pub mod organizations;
pub mod posts;
pub mod tags;
pub mod types;
