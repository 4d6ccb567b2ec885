//! Gesture recognition for Tactile views
//!
//! Gestures turn native mouse, touch, pointer and wheel events into a
//! lifecycle of hover, press and coast transitions. Three layers are
//! provided:
//!
//! - [`PositionGesture`]: hover and press tracking, taps and long presses.
//! - [`MomentumGesture`]: adds inertial coasting after a flick.
//! - [`ScaleGesture`]: drives a view's continuous scales from one or two
//!   inputs, including wheel zoom.

mod backend;
mod config;
mod constants;
mod error;
mod event;
mod gesture;
mod input;
mod momentum;
mod observer;
mod position;
mod scale;
mod view;

pub use backend::{
    backend_for, InputAction, InputBackend, InputUpdate, MouseBackend, PointerBackend,
    TouchBackend, WHEEL_ID,
};
pub use config::{GestureConfig, InputMethod, MomentumConfig, PlatformSupport, ScaleConfig};
pub use constants::*;
pub use error::GestureError;
pub use event::*;
pub use gesture::{
    Gesture, GestureMode, MomentumGesture, MomentumMode, PositionGesture, PositionMode, PressPhase,
};
pub use input::{GestureInput, InputDetail, InputId};
pub use observer::{GestureObserver, NoopObserver};
pub use scale::{client_to_range, enforce_separation, ScaleGesture, ScaleMode};
pub use view::{EventTarget, GestureView, ScaleView, TimerId};

pub use tactile_geometry::{Point, Rect, Size};
pub use tactile_scale::{ContinuousScale, LinearScale};

pub mod prelude {
    pub use crate::config::{GestureConfig, InputMethod, MomentumConfig, ScaleConfig};
    pub use crate::event::NativeEvent;
    pub use crate::gesture::{MomentumGesture, PositionGesture};
    pub use crate::input::{GestureInput, InputId};
    pub use crate::observer::GestureObserver;
    pub use crate::scale::ScaleGesture;
    pub use crate::view::{EventTarget, GestureView, ScaleView};
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod gesture_tests;

#[cfg(test)]
#[path = "tests/scale_tests.rs"]
mod scale_tests;
