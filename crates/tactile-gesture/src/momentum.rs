//! Inertial coasting after release.
//!
//! When a press ends with non-zero velocity the input keeps moving under a
//! constant deceleration opposing its velocity. The view drives the motion
//! by calling [`Gesture::animate`] once per frame until every coast has
//! decayed to rest.

use log::{debug, trace};

use crate::event::NativeEvent;
use crate::gesture::{Gesture, GestureMode};
use crate::view::GestureView;

/// Sign of `v`, with zero for zero.
pub(crate) fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl<V, M> Gesture<V, M>
where
    V: GestureView + ?Sized,
    M: GestureMode<V>,
{
    /// Starts coasting `id` with its current velocity. Does nothing for
    /// gestures without momentum, inputs already coasting, and inputs at
    /// rest.
    pub fn begin_coast(&mut self, id: &str, event: Option<&NativeEvent>) {
        let Some(acceleration) = self.mode.momentum().map(|config| config.acceleration) else {
            return;
        };
        let Some(input) = self.inputs.get_mut(id) else {
            return;
        };
        if input.coasting || (input.vx == 0.0 && input.vy == 0.0) {
            return;
        }
        let angle = input.vy.abs().atan2(input.vx.abs());
        let ax = -sign(input.vx) * acceleration * angle.cos();
        let ay = -sign(input.vy) * acceleration * angle.sin();
        if ax == 0.0 && ay == 0.0 {
            return;
        }
        input.ax = ax;
        input.ay = ay;

        if !self.notify(id, |observer, input| observer.will_begin_coast(input, event)) {
            if let Some(input) = self.inputs.get_mut(id) {
                input.ax = 0.0;
                input.ay = 0.0;
            }
            return;
        }
        if let Some(input) = self.inputs.get_mut(id) {
            input.set_anchor();
            input.coasting = true;
            debug!(
                "{}: begin coast {id} v=({:.3}, {:.3}) a=({:.5}, {:.5})",
                self.name, input.vx, input.vy, input.ax, input.ay
            );
        }
        self.coast_count += 1;
        M::on_begin_coast(self, id);
        self.notify(id, |observer, input| observer.on_begin_coast(input, event));
        self.notify(id, |observer, input| observer.did_begin_coast(input, event));
        if self.coast_count == 1 {
            self.start_coasting();
        }
        self.debug_verify();
    }

    pub fn end_coast(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| input.coasting) {
            return;
        }
        self.notify(id, |observer, input| observer.will_end_coast(input, event));
        if let Some(input) = self.inputs.get_mut(id) {
            input.coasting = false;
        }
        self.coast_count -= 1;
        debug!("{}: end coast {id}", self.name);
        M::on_end_coast(self, id);
        self.notify(id, |observer, input| observer.on_end_coast(input, event));
        self.notify(id, |observer, input| observer.did_end_coast(input, event));
        if self.coast_count == 0 {
            self.stop_coasting();
        }
        self.clear_if_inert(id);
        self.debug_verify();
    }

    /// Advances every coast to `t` and ends the ones that came to rest.
    pub fn do_coast(&mut self, t: f64) {
        if self.coast_count == 0 {
            return;
        }
        M::integrate(self, t);
        trace!("{}: coast tick t={t}", self.name);
        self.observer.on_coast();
        M::on_coast(self);

        let stopped = self.ids_where(|input| input.coasting && input.ax == 0.0 && input.ay == 0.0);
        for id in stopped {
            self.end_coast(&id, None);
        }
        if self.coast_count > 0 {
            self.require_animate();
        }
    }

    /// Ends every coast. Presses are left alone.
    pub fn interrupt(&mut self, event: Option<&NativeEvent>) {
        for id in self.ids_where(|input| input.coasting) {
            self.end_coast(&id, event);
        }
    }

    /// Cancels every press and ends every coast.
    pub fn cancel(&mut self, event: Option<&NativeEvent>) {
        for id in self.ids_where(|input| input.pressing) {
            self.cancel_press(&id, event);
        }
        self.interrupt(event);
    }

    /// Per-frame callback from the view.
    pub fn animate(&mut self, t: f64) {
        if self.coast_count > 0 {
            self.do_coast(t);
        }
        M::animate(self, t);
        self.debug_verify();
    }

    pub(crate) fn start_interacting(&mut self) {
        if self.interacting {
            return;
        }
        self.observer.will_start_interacting();
        self.interacting = true;
        debug!("{}: start interacting", self.name);
        self.observer.on_start_interacting();
        self.observer.did_start_interacting();
    }

    pub(crate) fn stop_interacting(&mut self) {
        if !self.interacting {
            return;
        }
        self.observer.will_stop_interacting();
        self.interacting = false;
        debug!("{}: stop interacting", self.name);
        self.observer.on_stop_interacting();
        self.observer.did_stop_interacting();
    }

    fn start_coasting(&mut self) {
        self.require_animate();
        self.observer.on_start_coasting();
        if self.press_count == 0 {
            self.start_interacting();
        }
    }

    fn stop_coasting(&mut self) {
        self.observer.on_stop_coasting();
        if self.press_count == 0 {
            self.stop_interacting();
        }
    }
}
