pub mod number;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use number::*;
pub use time::*;
