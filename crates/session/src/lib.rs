//! Client-side identity: decoding the stored access token into a display
//! session, persisting tokens and the theme preference, and the login /
//! signup / logout flows against the external auth service.
//!
//! Nothing here is a security boundary. The admin flag only decides which
//! controls are shown; the service enforces authorization on every call.

pub mod auth;
pub mod context;
pub mod storage;
pub mod store;
pub mod theme;
pub mod token;

pub use auth::*;
pub use context::*;
pub use storage::*;
pub use store::*;
pub use theme::*;
pub use token::*;
