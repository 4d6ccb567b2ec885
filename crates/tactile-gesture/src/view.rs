//! Host view contracts consumed by gestures.
//!
//! The view tree, its update scheduler and its event plumbing live outside
//! this crate. A gesture only needs to (de)register listeners, read the
//! view's bounds and clock, ask for animation frames and timers, and, for
//! scale gestures, read and write the view's scales.
//!
//! All methods take `&self`; hosts keep their mutable state behind `Cell` or
//! `RefCell` the way single-threaded UI runtimes do.

use tactile_geometry::Rect;
use tactile_scale::ContinuousScale;

use crate::event::EventType;
use crate::input::InputId;

pub type TimerId = u64;

/// Something native event listeners can be attached to.
pub trait EventTarget {
    fn add_event_listener(&self, event_type: EventType);
    fn remove_event_listener(&self, event_type: EventType);
}

/// The view a gesture is attached to.
pub trait GestureView: EventTarget {
    /// Bounds of the view in client (viewport) pixels.
    fn client_bounds(&self) -> Rect;

    /// Monotonic clock reading for the current frame, in milliseconds.
    fn update_time(&self) -> f64;

    /// Requests an animation pass; the host answers with
    /// [`Gesture::animate`](crate::Gesture::animate).
    fn require_animate(&self);

    /// Arms a one-shot timer. When it elapses the host calls
    /// [`Gesture::fire_hold_timer`](crate::Gesture::fire_hold_timer) with
    /// the same input id.
    fn set_timeout(&self, input_id: &InputId, delay: f64) -> TimerId;

    fn clear_timeout(&self, timer: TimerId);
}

/// A view owning a pair of continuous scales.
///
/// Either scale may be absent; the gesture then only rescales the other axis.
pub trait ScaleView<XS: ContinuousScale, YS: ContinuousScale>: GestureView {
    fn x_scale(&self) -> Option<XS>;
    fn y_scale(&self) -> Option<YS>;
    fn set_x_scale(&self, scale: XS);
    fn set_y_scale(&self, scale: YS);
}
