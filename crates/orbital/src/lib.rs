//! Orbital layout engine: maps catalog records onto concentric orbits with
//! declarative motion (duration, play state, start angle, radius).
//!
//! Nothing here touches the network or a clock. Hosts either hand the
//! emitted styles to a CSS animation or drive an [`OrbitClock`] themselves.

pub mod clock;
pub mod controls;
pub mod describe;
pub mod layout;
pub mod params;
pub mod style;

pub use clock::*;
pub use controls::*;
pub use describe::*;
pub use layout::*;
pub use params::*;
pub use style::*;
