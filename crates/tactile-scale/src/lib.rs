//! Continuous scales for Tactile
//!
//! A continuous scale maps a domain (data values) onto a range (pixels).
//! Scale gestures never own a scale: they read it from the host view, solve
//! a new domain that keeps the held data values under the user's fingers,
//! and write the result back.

mod continuous;
mod linear;

pub use continuous::ContinuousScale;
pub use linear::LinearScale;

pub mod prelude {
    pub use crate::continuous::ContinuousScale;
    pub use crate::linear::LinearScale;
}
