// Handlers are split by access tier:
// public (no API key) and protected (behind the API key gates).

pub mod protected;
pub mod public;

pub use protected::*;
pub use public::*;
