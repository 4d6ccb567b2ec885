//! Lifecycle callbacks emitted by gestures.
//!
//! Every transition is reported as a `will_*`/`on_*`/`did_*` triple. The
//! `will_begin_*` hooks can veto the transition by returning `false`; all
//! other hooks only observe. Each method defaults to a no-op so observers
//! implement just what they need.

use crate::event::NativeEvent;
use crate::input::GestureInput;

#[allow(unused_variables)]
pub trait GestureObserver<X = (), Y = ()> {
    fn will_begin_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) -> bool {
        true
    }
    fn on_begin_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_begin_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    fn will_end_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn on_end_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_end_hover(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    /// The first input started hovering.
    fn on_start_hovering(&mut self) {}
    /// The last hovering input left.
    fn on_stop_hovering(&mut self) {}

    fn will_begin_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) -> bool {
        true
    }
    fn on_begin_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_begin_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    fn will_move_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn on_move_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_move_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    fn will_end_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn on_end_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_end_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    fn will_cancel_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn on_cancel_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_cancel_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    /// A press ended without `prevent_default`: a completed tap or click.
    fn on_press(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    /// A press was held for the hold delay.
    fn on_long_press(&mut self, input: &GestureInput<X, Y>) {}

    /// The first press started; press tracking listeners are attached.
    fn on_start_pressing(&mut self) {}
    /// The last press ended; press tracking listeners are detached.
    fn on_stop_pressing(&mut self) {}

    fn will_begin_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) -> bool {
        true
    }
    fn on_begin_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_begin_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    fn will_end_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn on_end_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}
    fn did_end_coast(&mut self, input: &GestureInput<X, Y>, event: Option<&NativeEvent>) {}

    /// Coasting inputs were integrated for a new frame.
    fn on_coast(&mut self) {}

    fn on_start_coasting(&mut self) {}
    fn on_stop_coasting(&mut self) {}

    fn will_start_interacting(&mut self) {}
    fn on_start_interacting(&mut self) {}
    fn did_start_interacting(&mut self) {}

    fn will_stop_interacting(&mut self) {}
    fn on_stop_interacting(&mut self) {}
    fn did_stop_interacting(&mut self) {}
}

/// Observer that ignores every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<X, Y> GestureObserver<X, Y> for NoopObserver {}
