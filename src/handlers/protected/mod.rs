// Protected handlers. Routes here sit behind the API key gates, so a
// `CurrentUser` extension is always present.

pub mod status;
pub mod todos;

pub use status::{mark_done, mark_undone};
pub use todos::{create_todo, delete_todo};
