//! Hover and press state machine shared by every gesture.

use log::trace;

use crate::constants::HOLD_DELAY_TOLERANCE;
use crate::event::NativeEvent;
use crate::gesture::{Gesture, GestureMode, PressPhase};
use crate::view::GestureView;

impl<V, M> Gesture<V, M>
where
    V: GestureView + ?Sized,
    M: GestureMode<V>,
{
    pub fn begin_hover(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| !input.hovering) {
            return;
        }
        if !self.notify(id, |observer, input| observer.will_begin_hover(input, event)) {
            self.clear_if_inert(id);
            return;
        }
        if let Some(input) = self.inputs.get_mut(id) {
            input.hovering = true;
        }
        self.hover_count += 1;
        trace!("{}: begin hover {id}", self.name);
        self.notify(id, |observer, input| observer.on_begin_hover(input, event));
        self.notify(id, |observer, input| observer.did_begin_hover(input, event));
        if self.hover_count == 1 {
            self.observer.on_start_hovering();
        }
        self.debug_verify();
    }

    pub fn end_hover(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| input.hovering) {
            return;
        }
        self.notify(id, |observer, input| observer.will_end_hover(input, event));
        if let Some(input) = self.inputs.get_mut(id) {
            input.hovering = false;
        }
        self.hover_count -= 1;
        trace!("{}: end hover {id}", self.name);
        self.notify(id, |observer, input| observer.on_end_hover(input, event));
        self.notify(id, |observer, input| observer.did_end_hover(input, event));
        if self.hover_count == 0 {
            self.observer.on_stop_hovering();
        }
        self.clear_if_inert(id);
        self.debug_verify();
    }

    pub fn begin_press(&mut self, id: &str, event: Option<&NativeEvent>) {
        let Some(input_id) = self
            .inputs
            .get(id)
            .filter(|input| !input.pressing)
            .map(|input| input.id().clone())
        else {
            return;
        };
        if !self.notify(id, |observer, input| observer.will_begin_press(input, event)) {
            self.clear_if_inert(id);
            return;
        }

        let timer = self
            .view
            .as_deref()
            .map(|view| view.set_timeout(&input_id, self.hold_delay));
        let momentum = self.mode.momentum().copied();
        if let Some(input) = self.inputs.get_mut(id) {
            input.pressing = true;
            input.clear_default_prevented();
            input.set_anchor();
            input.hold_timer = timer;
            if let Some(config) = momentum {
                input.reset_momentum();
                input.update_position(config.hysteresis);
                input.derive_velocity(config.velocity_max);
            }
        }
        self.press_count += 1;
        trace!("{}: begin press {id}", self.name);
        if momentum.is_some() {
            // A new press catches every coasting input.
            self.interrupt(event);
        }

        self.notify(id, |observer, input| observer.on_begin_press(input, event));
        if self.press_count == 1 {
            self.start_pressing();
        }
        self.notify(id, |observer, input| observer.did_begin_press(input, event));
        M::on_press_update(self, id, PressPhase::Begin);
        self.debug_verify();
    }

    pub fn move_press(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| input.pressing) {
            return;
        }
        self.notify(id, |observer, input| observer.will_move_press(input, event));
        self.track_velocity(id);
        self.notify(id, |observer, input| observer.on_move_press(input, event));
        self.notify(id, |observer, input| observer.did_move_press(input, event));
        M::on_press_update(self, id, PressPhase::Move);
    }

    pub fn end_press(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| input.pressing) {
            return;
        }
        self.notify(id, |observer, input| observer.will_end_press(input, event));
        self.track_velocity(id);
        // Coasting starts while the press is still live so that interaction
        // continues without a gap.
        self.begin_coast(id, event);
        self.release_press(id);
        trace!("{}: end press {id}", self.name);
        self.notify(id, |observer, input| observer.on_end_press(input, event));
        self.notify(id, |observer, input| observer.did_end_press(input, event));
        M::on_press_update(self, id, PressPhase::End);
        if self.press_count == 0 {
            self.stop_pressing();
        }
        if self
            .inputs
            .get(id)
            .is_some_and(|input| !input.default_prevented())
        {
            self.press(id, event);
        }
        self.clear_if_inert(id);
        self.debug_verify();
    }

    pub fn cancel_press(&mut self, id: &str, event: Option<&NativeEvent>) {
        if !self.inputs.get(id).is_some_and(|input| input.pressing) {
            return;
        }
        self.notify(id, |observer, input| observer.will_cancel_press(input, event));
        self.track_velocity(id);
        self.release_press(id);
        trace!("{}: cancel press {id}", self.name);
        self.notify(id, |observer, input| observer.on_cancel_press(input, event));
        self.notify(id, |observer, input| observer.did_cancel_press(input, event));
        M::on_press_update(self, id, PressPhase::Cancel);
        if self.press_count == 0 {
            self.stop_pressing();
        }
        self.clear_if_inert(id);
        self.debug_verify();
    }

    /// Reports a completed tap or click.
    pub fn press(&mut self, id: &str, event: Option<&NativeEvent>) {
        self.notify(id, |observer, input| observer.on_press(input, event));
    }

    /// Reports a held press.
    pub fn long_press(&mut self, id: &str) {
        trace!("{}: long press {id}", self.name);
        self.notify(id, |observer, input| observer.on_long_press(input));
    }

    /// Called by the host when the hold timer armed for `id` elapses.
    ///
    /// Timers that were cleared, or that fire long after the hold delay
    /// because the host was suspended, are ignored.
    pub fn fire_hold_timer(&mut self, id: &str) {
        let now = match self.view.as_deref() {
            Some(view) => view.update_time(),
            None => return,
        };
        let limit = HOLD_DELAY_TOLERANCE * self.hold_delay;
        let Some(input) = self.inputs.get_mut(id) else {
            return;
        };
        if input.hold_timer.take().is_none() || !input.pressing {
            return;
        }
        if now - input.t0 < limit {
            self.long_press(id);
        }
    }

    fn track_velocity(&mut self, id: &str) {
        let Some(config) = self.mode.momentum().copied() else {
            return;
        };
        if let Some(input) = self.inputs.get_mut(id) {
            input.update_position(config.hysteresis);
            input.derive_velocity(config.velocity_max);
        }
    }

    fn release_press(&mut self, id: &str) {
        let Some(input) = self.inputs.get_mut(id) else {
            return;
        };
        input.pressing = false;
        if let Some(timer) = input.hold_timer.take() {
            if let Some(view) = self.view.as_deref() {
                view.clear_timeout(timer);
            }
        }
        self.press_count -= 1;
    }

    fn start_pressing(&mut self) {
        self.attach_press_listeners();
        self.observer.on_start_pressing();
        self.start_interacting();
    }

    fn stop_pressing(&mut self) {
        self.detach_press_listeners();
        self.observer.on_stop_pressing();
        if self.coast_count == 0 {
            self.stop_interacting();
        }
    }
}
