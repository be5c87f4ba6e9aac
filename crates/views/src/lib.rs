//! Front-end independent view models. Each view owns its state and exposes
//! `begin_*` / `apply_*` pairs around every request so a host can release
//! its borrow while the request is in flight; the async convenience methods
//! chain the two for hosts that can hold the view across an await.

pub mod auth_page;
pub mod card;
pub mod detail;
pub mod form;
pub mod grid;
pub mod navbar;
pub mod orbital_view;
pub mod prompt;
pub mod route;

pub use auth_page::*;
pub use card::*;
pub use detail::*;
pub use form::*;
pub use grid::*;
pub use navbar::*;
pub use orbital_view::*;
pub use prompt::*;
pub use route::*;
