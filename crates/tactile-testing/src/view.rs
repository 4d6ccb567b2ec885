//! In-memory host view.
//!
//! `TestView` records listener registrations, animation requests, timers
//! and scale writes so tests can assert on everything a gesture asks of its
//! host. Time only moves when the test advances it.

use std::cell::{Cell, RefCell};

use tactile_geometry::Rect;
use tactile_gesture::{
    EventTarget, EventType, Gesture, GestureMode, GestureView, InputId, ScaleView, TimerId,
};
use tactile_scale::LinearScale;

#[derive(Clone, Debug, PartialEq)]
pub struct PendingTimer {
    pub timer: TimerId,
    pub input_id: InputId,
    pub due: f64,
}

pub struct TestView {
    bounds: Cell<Rect>,
    now: Cell<f64>,
    listeners: RefCell<Vec<EventType>>,
    animate_requests: Cell<usize>,
    next_timer: Cell<TimerId>,
    timers: RefCell<Vec<PendingTimer>>,
    cleared_timers: RefCell<Vec<TimerId>>,
    x_scale: Cell<Option<LinearScale>>,
    y_scale: Cell<Option<LinearScale>>,
    x_scale_writes: RefCell<Vec<LinearScale>>,
    y_scale_writes: RefCell<Vec<LinearScale>>,
}

impl TestView {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Cell::new(bounds),
            now: Cell::new(0.0),
            listeners: RefCell::new(Vec::new()),
            animate_requests: Cell::new(0),
            next_timer: Cell::new(1),
            timers: RefCell::new(Vec::new()),
            cleared_timers: RefCell::new(Vec::new()),
            x_scale: Cell::new(None),
            y_scale: Cell::new(None),
            x_scale_writes: RefCell::new(Vec::new()),
            y_scale_writes: RefCell::new(Vec::new()),
        }
    }

    pub fn with_x_scale(self, scale: LinearScale) -> Self {
        self.x_scale.set(Some(scale));
        self
    }

    pub fn with_y_scale(self, scale: LinearScale) -> Self {
        self.y_scale.set(Some(scale));
        self
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    pub fn now(&self) -> f64 {
        self.now.get()
    }

    pub fn set_now(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) -> f64 {
        self.now.set(self.now.get() + dt);
        self.now.get()
    }

    /// Listeners currently attached, in registration order.
    pub fn listeners(&self) -> Vec<EventType> {
        self.listeners.borrow().clone()
    }

    pub fn is_listening(&self, event_type: EventType) -> bool {
        self.listeners.borrow().contains(&event_type)
    }

    pub fn animate_requests(&self) -> usize {
        self.animate_requests.get()
    }

    /// Consumes pending animation requests; true when there was one.
    pub fn take_animate_request(&self) -> bool {
        self.animate_requests.replace(0) > 0
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.borrow().clone()
    }

    pub fn cleared_timers(&self) -> Vec<TimerId> {
        self.cleared_timers.borrow().clone()
    }

    /// Removes and returns the timers due at the current time.
    pub fn take_due_timers(&self) -> Vec<PendingTimer> {
        let now = self.now();
        let mut timers = self.timers.borrow_mut();
        let (due, pending): (Vec<_>, Vec<_>) = timers.drain(..).partition(|timer| timer.due <= now);
        *timers = pending;
        due
    }

    pub fn current_x_scale(&self) -> Option<LinearScale> {
        self.x_scale.get()
    }

    pub fn current_y_scale(&self) -> Option<LinearScale> {
        self.y_scale.get()
    }

    pub fn x_scale_writes(&self) -> Vec<LinearScale> {
        self.x_scale_writes.borrow().clone()
    }

    pub fn y_scale_writes(&self) -> Vec<LinearScale> {
        self.y_scale_writes.borrow().clone()
    }
}

impl EventTarget for TestView {
    fn add_event_listener(&self, event_type: EventType) {
        self.listeners.borrow_mut().push(event_type);
    }

    fn remove_event_listener(&self, event_type: EventType) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|&e| e == event_type) {
            listeners.remove(index);
        }
    }
}

impl GestureView for TestView {
    fn client_bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn update_time(&self) -> f64 {
        self.now.get()
    }

    fn require_animate(&self) {
        self.animate_requests.set(self.animate_requests.get() + 1);
    }

    fn set_timeout(&self, input_id: &InputId, delay: f64) -> TimerId {
        let timer = self.next_timer.get();
        self.next_timer.set(timer + 1);
        self.timers.borrow_mut().push(PendingTimer {
            timer,
            input_id: input_id.clone(),
            due: self.now() + delay,
        });
        timer
    }

    fn clear_timeout(&self, timer: TimerId) {
        self.timers.borrow_mut().retain(|pending| pending.timer != timer);
        self.cleared_timers.borrow_mut().push(timer);
    }
}

impl ScaleView<LinearScale, LinearScale> for TestView {
    fn x_scale(&self) -> Option<LinearScale> {
        self.x_scale.get()
    }

    fn y_scale(&self) -> Option<LinearScale> {
        self.y_scale.get()
    }

    fn set_x_scale(&self, scale: LinearScale) {
        self.x_scale.set(Some(scale));
        self.x_scale_writes.borrow_mut().push(scale);
    }

    fn set_y_scale(&self, scale: LinearScale) {
        self.y_scale.set(Some(scale));
        self.y_scale_writes.borrow_mut().push(scale);
    }
}

/// Runs animation frames `frame` ms apart for as long as the gesture keeps
/// requesting them, up to `limit` frames. Returns the number of frames run.
pub fn run_frames<M>(
    gesture: &mut Gesture<TestView, M>,
    view: &TestView,
    frame: f64,
    limit: usize,
) -> usize
where
    M: GestureMode<TestView>,
{
    let mut frames = 0;
    while frames < limit && view.take_animate_request() {
        let t = view.advance(frame);
        gesture.animate(t);
        frames += 1;
    }
    frames
}

/// Fires every hold timer that is due at the view's current time.
pub fn fire_due_timers<M>(gesture: &mut Gesture<TestView, M>, view: &TestView)
where
    M: GestureMode<TestView>,
{
    for timer in view.take_due_timers() {
        gesture.fire_hold_timer(&timer.input_id);
    }
}
