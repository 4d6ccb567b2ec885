use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(crate) struct MockView {
    pub listeners: RefCell<Vec<EventType>>,
    pub now: Cell<f64>,
    pub animate_requests: Cell<usize>,
    pub timers: RefCell<Vec<(TimerId, InputId)>>,
    pub cleared: RefCell<Vec<TimerId>>,
    pub x_scale: Cell<Option<LinearScale>>,
    pub y_scale: Cell<Option<LinearScale>>,
    pub x_writes: Cell<usize>,
    pub y_writes: Cell<usize>,
}

impl MockView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            listeners: RefCell::new(Vec::new()),
            now: Cell::new(0.0),
            animate_requests: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            cleared: RefCell::new(Vec::new()),
            x_scale: Cell::new(None),
            y_scale: Cell::new(None),
            x_writes: Cell::new(0),
            y_writes: Cell::new(0),
        })
    }
}

impl EventTarget for MockView {
    fn add_event_listener(&self, event_type: EventType) {
        self.listeners.borrow_mut().push(event_type);
    }

    fn remove_event_listener(&self, event_type: EventType) {
        self.listeners.borrow_mut().retain(|&e| e != event_type);
    }
}

impl GestureView for MockView {
    fn client_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 300.0, 300.0)
    }

    fn update_time(&self) -> f64 {
        self.now.get()
    }

    fn require_animate(&self) {
        self.animate_requests.set(self.animate_requests.get() + 1);
    }

    fn set_timeout(&self, input_id: &InputId, _delay: f64) -> TimerId {
        let timer = self.timers.borrow().len() as TimerId + 1;
        self.timers.borrow_mut().push((timer, input_id.clone()));
        timer
    }

    fn clear_timeout(&self, timer: TimerId) {
        self.cleared.borrow_mut().push(timer);
    }
}

impl ScaleView<LinearScale, LinearScale> for MockView {
    fn x_scale(&self) -> Option<LinearScale> {
        self.x_scale.get()
    }

    fn y_scale(&self) -> Option<LinearScale> {
        self.y_scale.get()
    }

    fn set_x_scale(&self, scale: LinearScale) {
        self.x_scale.set(Some(scale));
        self.x_writes.set(self.x_writes.get() + 1);
    }

    fn set_y_scale(&self, scale: LinearScale) {
        self.y_scale.set(Some(scale));
        self.y_writes.set(self.y_writes.get() + 1);
    }
}

#[derive(Clone, Default)]
pub(crate) struct Log {
    entries: Rc<RefCell<Vec<String>>>,
    veto: Rc<Cell<bool>>,
}

impl Log {
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries.borrow().iter().filter(|e| *e == entry).count()
    }

    fn push(&self, entry: &str) {
        self.entries.borrow_mut().push(entry.to_owned());
    }
}

impl<X, Y> GestureObserver<X, Y> for Log {
    fn will_begin_hover(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) -> bool {
        !self.veto.get()
    }
    fn on_begin_hover(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("begin_hover");
    }
    fn on_end_hover(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("end_hover");
    }
    fn on_begin_press(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("begin_press");
    }
    fn on_end_press(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("end_press");
    }
    fn on_cancel_press(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("cancel_press");
    }
    fn on_press(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("press");
    }
    fn on_long_press(&mut self, _: &GestureInput<X, Y>) {
        self.push("long_press");
    }
    fn will_begin_coast(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) -> bool {
        !self.veto.get()
    }
    fn on_begin_coast(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("begin_coast");
    }
    fn on_end_coast(&mut self, _: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        self.push("end_coast");
    }
    fn on_start_interacting(&mut self) {
        self.push("start_interacting");
    }
    fn on_stop_interacting(&mut self) {
        self.push("stop_interacting");
    }
}

fn mouse_config() -> GestureConfig {
    GestureConfig::default().with_method(InputMethod::Mouse)
}

fn position_gesture(view: &Rc<MockView>, log: &Log) -> PositionGesture<MockView> {
    let mut gesture = PositionGesture::new("position", mouse_config()).with_observer(log.clone());
    gesture.set_view(Some(Rc::clone(view)));
    gesture
}

fn momentum_gesture(view: &Rc<MockView>, log: &Log) -> MomentumGesture<MockView> {
    let momentum = MomentumConfig::default().with_acceleration(0.001);
    let mut gesture = MomentumGesture::new("momentum", mouse_config(), momentum).with_observer(log.clone());
    gesture.set_view(Some(Rc::clone(view)));
    gesture
}

fn press_at<M: GestureMode<MockView>>(gesture: &mut Gesture<MockView, M>, x: f64, y: f64, t: f64) {
    gesture.get_or_create_input("mouse", InputType::Mouse, true, x, y, t);
    gesture.begin_press("mouse", None);
}

fn move_to<M: GestureMode<MockView>>(gesture: &mut Gesture<MockView, M>, x: f64, y: f64, t: f64) {
    if let Some(input) = gesture.get_input_mut("mouse") {
        input.update(x, y, t);
    }
    gesture.move_press("mouse", None);
}

#[test]
fn hover_is_idempotent() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    gesture.get_or_create_input("mouse", InputType::Mouse, true, 10.0, 10.0, 0.0);
    gesture.begin_hover("mouse", None);
    gesture.begin_hover("mouse", None);
    assert_eq!(gesture.hover_count(), 1);
    assert_eq!(log.count("begin_hover"), 1);

    gesture.end_hover("mouse", None);
    gesture.end_hover("mouse", None);
    assert_eq!(gesture.hover_count(), 0);
    assert_eq!(log.count("end_hover"), 1);
    assert_eq!(gesture.input_count(), 0);
    assert_eq!(gesture.verify(), Ok(()));
}

#[test]
fn vetoed_hover_leaves_no_record() {
    let view = MockView::new();
    let log = Log::default();
    log.veto.set(true);
    let mut gesture = position_gesture(&view, &log);

    gesture.get_or_create_input("mouse", InputType::Mouse, true, 10.0, 10.0, 0.0);
    gesture.begin_hover("mouse", None);
    assert_eq!(gesture.hover_count(), 0);
    assert_eq!(gesture.input_count(), 0);
}

#[test]
fn tap_fires_press_once() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    press_at(&mut gesture, 50.0, 50.0, 0.0);
    assert_eq!(gesture.press_count(), 1);
    assert!(gesture.is_interacting());
    gesture.end_press("mouse", None);

    assert_eq!(
        log.entries(),
        ["begin_press", "start_interacting", "end_press", "stop_interacting", "press"]
    );
    assert_eq!(gesture.input_count(), 0);
    assert!(!gesture.is_interacting());
}

#[test]
fn cancel_does_not_press() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    press_at(&mut gesture, 50.0, 50.0, 0.0);
    gesture.cancel_press("mouse", None);
    assert_eq!(log.count("cancel_press"), 1);
    assert_eq!(log.count("press"), 0);
    assert_eq!(gesture.press_count(), 0);
}

#[test]
fn press_listeners_follow_press_count() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);
    assert_eq!(
        *view.listeners.borrow(),
        [EventType::MouseEnter, EventType::MouseLeave, EventType::MouseDown]
    );

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    assert!(view.listeners.borrow().contains(&EventType::MouseMove));
    assert!(view.listeners.borrow().contains(&EventType::MouseUp));

    gesture.end_press("mouse", None);
    assert!(!view.listeners.borrow().contains(&EventType::MouseMove));
    assert!(!view.listeners.borrow().contains(&EventType::MouseUp));
}

#[test]
fn unmount_is_a_hard_reset() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    gesture.get_or_create_input("mouse", InputType::Mouse, true, 0.0, 0.0, 0.0);
    gesture.begin_hover("mouse", None);
    gesture.begin_press("mouse", None);
    let before = log.entries().len();

    gesture.set_view(None);
    assert_eq!(gesture.input_count(), 0);
    assert_eq!(gesture.hover_count(), 0);
    assert_eq!(gesture.press_count(), 0);
    assert!(!gesture.is_interacting());
    assert!(view.listeners.borrow().is_empty());
    assert_eq!(*view.cleared.borrow(), [1]);
    assert_eq!(log.entries().len(), before);
    assert_eq!(gesture.view().err(), Some(GestureError::Unbound));
}

#[test]
fn long_press_respects_tolerance() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    view.now.set(400.0);
    gesture.fire_hold_timer("mouse");
    assert_eq!(log.count("long_press"), 1);
    gesture.end_press("mouse", None);

    press_at(&mut gesture, 0.0, 0.0, 1000.0);
    view.now.set(1000.0 + 600.0);
    gesture.fire_hold_timer("mouse");
    assert_eq!(log.count("long_press"), 1);
}

#[test]
fn hold_timer_is_cleared_on_release() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = position_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    gesture.end_press("mouse", None);
    assert_eq!(*view.cleared.borrow(), [1]);

    view.now.set(400.0);
    gesture.fire_hold_timer("mouse");
    assert_eq!(log.count("long_press"), 0);
}

#[test]
fn unknown_input_is_an_error() {
    let view = MockView::new();
    let gesture = position_gesture(&view, &Log::default());
    assert_eq!(
        gesture.input("touch3").err(),
        Some(GestureError::UnknownInput(InputId::new("touch3")))
    );
    assert!(gesture.get_input("touch3").is_none());
}

#[test]
fn flick_coasts_and_decays_to_rest() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = momentum_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    move_to(&mut gesture, 10.0, 0.0, 10.0);
    move_to(&mut gesture, 20.0, 0.0, 20.0);
    gesture.end_press("mouse", None);

    assert_eq!(log.count("begin_coast"), 1);
    assert_eq!(gesture.coast_count(), 1);
    assert!(gesture.is_interacting());
    let input = gesture.input("mouse").expect("coasting input");
    assert_eq!(input.vx, 1.0);
    assert_eq!(input.ax, -0.001);
    assert_eq!(input.ay, 0.0);

    let mut t = 20.0;
    let mut ticks = 0;
    let mut last_vx = 1.0;
    while gesture.coast_count() > 0 {
        t += 16.0;
        ticks += 1;
        gesture.animate(t);
        if let Some(input) = gesture.get_input("mouse") {
            assert!(input.vx > 0.0 && input.vx < last_vx);
            last_vx = input.vx;
        }
        assert!(ticks <= 63);
    }
    assert_eq!(ticks, 63);
    assert_eq!(log.count("end_coast"), 1);
    assert_eq!(gesture.input_count(), 0);
    assert!(!gesture.is_interacting());
}

#[test]
fn new_press_interrupts_coast() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = momentum_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    move_to(&mut gesture, 20.0, 0.0, 20.0);
    gesture.end_press("mouse", None);
    assert_eq!(gesture.coast_count(), 1);

    gesture.animate(36.0);
    press_at(&mut gesture, 40.0, 0.0, 40.0);
    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(log.count("end_coast"), 1);
    let input = gesture.input("mouse").expect("pressed input");
    assert!(input.is_pressing());
    assert_eq!(input.velocity(), Point::ZERO);
    assert!(gesture.is_interacting());
}

#[test]
fn vetoed_coast_ends_interaction() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = momentum_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    move_to(&mut gesture, 20.0, 0.0, 20.0);
    log.veto.set(true);
    gesture.end_press("mouse", None);

    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(log.count("begin_coast"), 0);
    assert_eq!(gesture.input_count(), 0);
    assert!(!gesture.is_interacting());
}

#[test]
fn diagonal_coast_stops_both_axes_together() {
    let view = MockView::new();
    let log = Log::default();
    let mut gesture = momentum_gesture(&view, &log);

    press_at(&mut gesture, 0.0, 0.0, 0.0);
    move_to(&mut gesture, 6.0, -8.0, 10.0);
    gesture.end_press("mouse", None);

    let input = gesture.input("mouse").expect("coasting input");
    let ratio = input.ax / input.vx;
    assert!((input.ay / input.vy - ratio).abs() < 1e-12);
    assert!(input.ax < 0.0 && input.ay > 0.0);

    let mut t = 10.0;
    while gesture.coast_count() > 0 {
        t += 16.0;
        gesture.animate(t);
    }
    assert_eq!(log.count("end_coast"), 1);
}
