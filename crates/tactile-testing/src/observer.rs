//! Observer that records every callback it receives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tactile_gesture::{GestureInput, GestureObserver, NativeEvent};

#[derive(Default)]
struct Recorder {
    log: RefCell<Vec<String>>,
    veto_hover: Cell<bool>,
    veto_press: Cell<bool>,
    veto_coast: Cell<bool>,
    prevent_default: Cell<bool>,
}

/// Records callbacks as `"hook"` or `"hook:input_id"` entries.
///
/// Clones share one log, so a test keeps a clone and hands another to the
/// gesture.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    recorder: Rc<Recorder>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<String> {
        self.recorder.log.borrow().clone()
    }

    /// Entries for `hook`, with or without an input id.
    pub fn count(&self, hook: &str) -> usize {
        self.recorder
            .log
            .borrow()
            .iter()
            .filter(|entry| entry.split(':').next() == Some(hook))
            .count()
    }

    /// Index of the first exact match of `entry`.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.recorder.log.borrow().iter().position(|e| e == entry)
    }

    /// Log entries without per-frame `coast` ticks.
    pub fn transitions(&self) -> Vec<String> {
        self.recorder
            .log
            .borrow()
            .iter()
            .filter(|entry| entry.as_str() != "coast")
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.recorder.log.borrow_mut().clear();
    }

    pub fn set_veto_hover(&self, veto: bool) {
        self.recorder.veto_hover.set(veto);
    }

    pub fn set_veto_press(&self, veto: bool) {
        self.recorder.veto_press.set(veto);
    }

    pub fn set_veto_coast(&self, veto: bool) {
        self.recorder.veto_coast.set(veto);
    }

    /// Calls `prevent_default` on every input in `on_begin_press`.
    pub fn set_prevent_default(&self, prevent: bool) {
        self.recorder.prevent_default.set(prevent);
    }

    fn record(&self, hook: &str) {
        self.recorder.log.borrow_mut().push(hook.to_owned());
    }

    fn record_input<X, Y>(&self, hook: &str, input: &GestureInput<X, Y>) {
        self.recorder
            .log
            .borrow_mut()
            .push(format!("{hook}:{}", input.id()));
    }
}

impl<X, Y> GestureObserver<X, Y> for RecordingObserver {
    fn will_begin_hover(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) -> bool {
        self.record_input("will_begin_hover", input);
        !self.recorder.veto_hover.get()
    }
    fn on_begin_hover(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("begin_hover", input);
    }
    fn on_end_hover(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("end_hover", input);
    }
    fn on_start_hovering(&mut self) {
        self.record("start_hovering");
    }
    fn on_stop_hovering(&mut self) {
        self.record("stop_hovering");
    }

    fn will_begin_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) -> bool {
        self.record_input("will_begin_press", input);
        !self.recorder.veto_press.get()
    }
    fn on_begin_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("begin_press", input);
        if self.recorder.prevent_default.get() {
            input.prevent_default();
        }
    }
    fn on_move_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("move_press", input);
    }
    fn on_end_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("end_press", input);
    }
    fn on_cancel_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("cancel_press", input);
    }
    fn on_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("press", input);
    }
    fn on_long_press(&mut self, input: &GestureInput<X, Y>) {
        self.record_input("long_press", input);
    }
    fn on_start_pressing(&mut self) {
        self.record("start_pressing");
    }
    fn on_stop_pressing(&mut self) {
        self.record("stop_pressing");
    }

    fn will_begin_coast(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) -> bool {
        self.record_input("will_begin_coast", input);
        !self.recorder.veto_coast.get()
    }
    fn on_begin_coast(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("begin_coast", input);
    }
    fn on_end_coast(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.record_input("end_coast", input);
    }
    fn on_coast(&mut self) {
        self.record("coast");
    }
    fn on_start_coasting(&mut self) {
        self.record("start_coasting");
    }
    fn on_stop_coasting(&mut self) {
        self.record("stop_coasting");
    }

    fn on_start_interacting(&mut self) {
        self.record("start_interacting");
    }
    fn on_stop_interacting(&mut self) {
        self.record("stop_interacting");
    }
}
