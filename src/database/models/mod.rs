pub mod todo;
pub mod user;

pub use todo::{Todo, CONTENT_MAX_LEN};
pub use user::{CurrentUser, User, USERNAME_MAX_LEN};
