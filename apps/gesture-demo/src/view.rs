use std::cell::{Cell, RefCell};
use std::time::Duration;

use log::{debug, info};
use tactile_gesture::{
    EventTarget, EventType, Gesture, GestureMode, GestureView, InputId, LinearScale, Rect,
    ScaleView, TimerId,
};
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);

struct Timer {
    id: TimerId,
    input_id: InputId,
    due: f64,
}

/// A headless chart-like view driven by the wall clock.
pub struct DemoView {
    bounds: Rect,
    epoch: Instant,
    listeners: RefCell<Vec<EventType>>,
    animate_requested: Cell<bool>,
    next_timer: Cell<TimerId>,
    timers: RefCell<Vec<Timer>>,
    x_scale: Cell<Option<LinearScale>>,
    y_scale: Cell<Option<LinearScale>>,
}

impl DemoView {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            epoch: Instant::now(),
            listeners: RefCell::new(Vec::new()),
            animate_requested: Cell::new(false),
            next_timer: Cell::new(1),
            timers: RefCell::new(Vec::new()),
            x_scale: Cell::new(None),
            y_scale: Cell::new(None),
        }
    }

    pub fn with_scales(self, x: LinearScale, y: LinearScale) -> Self {
        self.x_scale.set(Some(x));
        self.y_scale.set(Some(y));
        self
    }

    /// Milliseconds since the view was created.
    pub fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn listeners(&self) -> Vec<EventType> {
        self.listeners.borrow().clone()
    }

    pub fn x_domain(&self) -> Option<(f64, f64)> {
        self.x_scale.get().map(|scale| scale.domain())
    }

    pub fn y_domain(&self) -> Option<(f64, f64)> {
        self.y_scale.get().map(|scale| scale.domain())
    }

    fn take_due_timers(&self) -> Vec<InputId> {
        let now = self.now();
        let mut due = Vec::new();
        self.timers.borrow_mut().retain(|timer| {
            if timer.due <= now {
                due.push(timer.input_id.clone());
                false
            } else {
                true
            }
        });
        due
    }

    fn has_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }
}

impl EventTarget for DemoView {
    fn add_event_listener(&self, event_type: EventType) {
        debug!("listen {event_type:?}");
        self.listeners.borrow_mut().push(event_type);
    }

    fn remove_event_listener(&self, event_type: EventType) {
        debug!("unlisten {event_type:?}");
        self.listeners.borrow_mut().retain(|&e| e != event_type);
    }
}

impl GestureView for DemoView {
    fn client_bounds(&self) -> Rect {
        self.bounds
    }

    fn update_time(&self) -> f64 {
        self.now()
    }

    fn require_animate(&self) {
        self.animate_requested.set(true);
    }

    fn set_timeout(&self, input_id: &InputId, delay: f64) -> TimerId {
        let id = self.next_timer.get();
        self.next_timer.set(id + 1);
        self.timers.borrow_mut().push(Timer {
            id,
            input_id: input_id.clone(),
            due: self.now() + delay,
        });
        id
    }

    fn clear_timeout(&self, timer: TimerId) {
        self.timers.borrow_mut().retain(|pending| pending.id != timer);
    }
}

impl ScaleView<LinearScale, LinearScale> for DemoView {
    fn x_scale(&self) -> Option<LinearScale> {
        self.x_scale.get()
    }

    fn y_scale(&self) -> Option<LinearScale> {
        self.y_scale.get()
    }

    fn set_x_scale(&self, scale: LinearScale) {
        self.x_scale.set(Some(scale));
    }

    fn set_y_scale(&self, scale: LinearScale) {
        self.y_scale.set(Some(scale));
    }
}

/// Sleeps for `duration`, servicing frames and timers meanwhile.
pub fn idle<M: GestureMode<DemoView>>(
    gesture: &mut Gesture<DemoView, M>,
    view: &DemoView,
    duration: Duration,
) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        std::thread::sleep(FRAME.min(deadline.saturating_duration_since(Instant::now())));
        service(gesture, view);
    }
}

/// Runs frames until the gesture stops asking for them and no timers are
/// armed. Returns the number of animation frames run.
pub fn settle<M: GestureMode<DemoView>>(gesture: &mut Gesture<DemoView, M>, view: &DemoView) -> usize {
    let mut frames = 0;
    while view.animate_requested.get() || view.has_timers() {
        std::thread::sleep(FRAME);
        if service(gesture, view) {
            frames += 1;
        }
    }
    info!("{}: settled after {frames} frames", gesture.name());
    frames
}

fn service<M: GestureMode<DemoView>>(gesture: &mut Gesture<DemoView, M>, view: &DemoView) -> bool {
    for input_id in view.take_due_timers() {
        gesture.fire_hold_timer(&input_id);
    }
    if view.animate_requested.replace(false) {
        gesture.animate(view.now());
        true
    } else {
        false
    }
}
