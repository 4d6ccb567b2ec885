//! Testing utilities and host doubles for Tactile gestures

pub mod events;
pub mod observer;
pub mod view;

pub use events::*;
pub use observer::*;
pub use view::*;

pub mod prelude {
    pub use crate::events::*;
    pub use crate::observer::*;
    pub use crate::view::*;
}
