// Public handlers (no API key required)

pub mod fallback;
pub mod health;
pub mod register;

pub use fallback::{method_not_allowed, not_found};
pub use health::{health, root};
pub use register::register;
