//! Pure math for gesture geometry in Tactile
//!
//! This crate contains the client-space primitives shared by the gesture
//! recognizers and their host views.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
