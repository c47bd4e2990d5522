pub mod public;
mod router;

pub use router::{require_token, router};
