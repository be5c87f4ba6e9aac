//! Animated star background: a small fly-through simulation plus the browser
//! canvas that draws it every animation frame.

pub mod frame_loop;
pub mod sim;

#[cfg(target_arch = "wasm32")]
mod surface;
#[cfg(not(target_arch = "wasm32"))]
mod surface_stub;

pub use frame_loop::FrameLoop;
pub use sim::*;

#[cfg(target_arch = "wasm32")]
pub use surface::StarfieldSurface;
#[cfg(not(target_arch = "wasm32"))]
pub use surface_stub::StarfieldSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// No window, document or 2D context.
    Unavailable,
    Dom(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Unavailable => write!(f, "no drawing surface available"),
            SurfaceError::Dom(msg) => write!(f, "dom error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}
