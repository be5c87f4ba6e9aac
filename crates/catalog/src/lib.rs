//! Client-side model of the remote planet catalog: records, request payloads,
//! error taxonomy and the transports that talk to the catalog/auth service.

pub mod api;
pub mod body;
pub mod config;
pub mod error;
pub mod memory;
pub mod payload;

#[cfg(not(target_arch = "wasm32"))]
mod http;
#[cfg(target_arch = "wasm32")]
mod fetch;

pub use api::*;
pub use body::*;
pub use config::*;
pub use error::*;
pub use memory::*;
pub use payload::*;

#[cfg(not(target_arch = "wasm32"))]
pub use http::RemoteClient;
#[cfg(target_arch = "wasm32")]
pub use fetch::RemoteClient;
