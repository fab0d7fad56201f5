//! Feedback repositories: posts, comments, tags, types.

mod comment;
mod feedback_type;
mod post;
mod tag;

pub use comment::CommentRepository;
pub use feedback_type::TypeRepository;
pub use post::PostRepository;
pub use tag::TagRepository;
