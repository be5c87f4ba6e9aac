pub mod frame;
pub mod mount;
pub mod notice;

pub use frame::*;
pub use mount::*;
pub use notice::*;
