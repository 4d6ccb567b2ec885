//! Replays scripted input against each gesture tier and logs what the
//! gestures report. Run with `RUST_LOG=debug` to see coasting details.

mod view;

use std::rc::Rc;
use std::time::Duration;

use log::info;
use tactile_gesture::{
    GestureConfig, GestureInput, GestureObserver, InputMethod, LinearScale, MomentumConfig,
    MomentumGesture, MouseEvent, MouseEventKind, NativeEvent, Point, PointerButton,
    PositionGesture, Rect, ScaleConfig, ScaleGesture, Touch, TouchEvent, TouchEventKind,
    WheelEvent,
};

use view::{idle, settle, DemoView};

/// Logs every transition at info level.
struct LogObserver;

impl<X, Y> GestureObserver<X, Y> for LogObserver {
    fn on_begin_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        info!("begin press {} at ({:.1}, {:.1})", input.id(), input.x, input.y);
    }

    fn on_end_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        info!("end press {} after {:.0} ms", input.id(), input.t - input.t0);
    }

    fn on_press(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        info!("press {}", input.id());
    }

    fn on_long_press(&mut self, input: &GestureInput<X, Y>) {
        info!("long press {}", input.id());
    }

    fn on_begin_coast(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        info!(
            "begin coast {} v=({:.3}, {:.3}) px/ms",
            input.id(),
            input.vx,
            input.vy
        );
    }

    fn on_end_coast(&mut self, input: &GestureInput<X, Y>, _: Option<&NativeEvent>) {
        info!("end coast {} at ({:.1}, {:.1})", input.id(), input.x, input.y);
    }

    fn on_start_interacting(&mut self) {
        info!("start interacting");
    }

    fn on_stop_interacting(&mut self) {
        info!("stop interacting");
    }
}

fn mouse(view: &DemoView, kind: MouseEventKind, x: f64, y: f64) -> NativeEvent {
    let event = MouseEvent::new(kind, Point::new(x, y), view.now());
    match kind {
        MouseEventKind::Down | MouseEventKind::Up => event.with_button(PointerButton::Primary).into(),
        _ => event.into(),
    }
}

fn touches(view: &DemoView, kind: TouchEventKind, points: &[(i64, f64, f64)]) -> NativeEvent {
    let touches: Vec<Touch> = points
        .iter()
        .map(|&(id, x, y)| Touch::new(id, Point::new(x, y)))
        .collect();
    TouchEvent::new(kind, &touches, view.now()).into()
}

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn scales() -> (LinearScale, LinearScale) {
    (
        LinearScale::new((0.0, 100.0), (0.0, 800.0)),
        LinearScale::new((0.0, 75.0), (600.0, 0.0)),
    )
}

fn tap_and_hold() {
    info!("--- tap and hold (mouse) ---");
    let view = Rc::new(DemoView::new(bounds()));
    let config = GestureConfig::default().with_method(InputMethod::Mouse);
    let mut gesture: PositionGesture<DemoView> =
        PositionGesture::new("tap", config).with_observer(LogObserver);
    gesture.set_view(Some(Rc::clone(&view)));

    gesture.handle_event(&mouse(&view, MouseEventKind::Enter, 100.0, 100.0));
    gesture.handle_event(&mouse(&view, MouseEventKind::Down, 100.0, 100.0));
    idle(&mut gesture, &view, Duration::from_millis(80));
    gesture.handle_event(&mouse(&view, MouseEventKind::Up, 100.0, 100.0));

    gesture.handle_event(&mouse(&view, MouseEventKind::Down, 120.0, 100.0));
    idle(&mut gesture, &view, Duration::from_millis(500));
    gesture.handle_event(&mouse(&view, MouseEventKind::Up, 120.0, 100.0));
    gesture.handle_event(&mouse(&view, MouseEventKind::Leave, 900.0, 100.0));
    info!("listeners after leaving: {:?}", view.listeners());
}

fn flick() {
    info!("--- flick (mouse) ---");
    let view = Rc::new(DemoView::new(bounds()));
    let config = GestureConfig::default().with_method(InputMethod::Mouse);
    let mut gesture: MomentumGesture<DemoView> =
        MomentumGesture::new("flick", config, MomentumConfig::default()).with_observer(LogObserver);
    gesture.set_view(Some(Rc::clone(&view)));

    gesture.handle_event(&mouse(&view, MouseEventKind::Down, 100.0, 300.0));
    for step in 1..=4 {
        idle(&mut gesture, &view, Duration::from_millis(8));
        let x = 100.0 + 12.0 * f64::from(step);
        gesture.handle_event(&mouse(&view, MouseEventKind::Move, x, 300.0 - 3.0 * f64::from(step)));
    }
    gesture.handle_event(&mouse(&view, MouseEventKind::Up, 148.0, 288.0));
    settle(&mut gesture, &view);
}

fn pinch() {
    info!("--- pinch (touch) ---");
    let (x, y) = scales();
    let view = Rc::new(DemoView::new(bounds()).with_scales(x, y));
    let config = GestureConfig::default().with_method(InputMethod::Touch);
    let scale = ScaleConfig::default().with_preserve_aspect_ratio(true);
    let mut gesture: ScaleGesture<DemoView> =
        ScaleGesture::new("pinch", config, MomentumConfig::default(), scale)
            .with_observer(LogObserver);
    gesture.set_view(Some(Rc::clone(&view)));

    gesture.handle_event(&touches(&view, TouchEventKind::Start, &[(1, 350.0, 300.0), (2, 450.0, 300.0)]));
    for step in 1..=5 {
        idle(&mut gesture, &view, Duration::from_millis(10));
        let spread = 8.0 * f64::from(step);
        gesture.handle_event(&touches(
            &view,
            TouchEventKind::Move,
            &[(1, 350.0 - spread, 300.0), (2, 450.0 + spread, 300.0)],
        ));
    }
    gesture.handle_event(&touches(&view, TouchEventKind::End, &[(1, 310.0, 300.0), (2, 490.0, 300.0)]));
    settle(&mut gesture, &view);
    info!("x domain {:?}, y domain {:?}", view.x_domain(), view.y_domain());
}

fn wheel_zoom() {
    info!("--- wheel zoom ---");
    let (x, y) = scales();
    let view = Rc::new(DemoView::new(bounds()).with_scales(x, y));
    let config = GestureConfig::default().with_method(InputMethod::Mouse);
    let mut gesture: ScaleGesture<DemoView> = ScaleGesture::new(
        "wheel",
        config,
        MomentumConfig::default(),
        ScaleConfig::default(),
    )
    .with_observer(LogObserver);
    gesture.set_view(Some(Rc::clone(&view)));

    for delta in [-40.0, -40.0, -20.0] {
        let event: NativeEvent = WheelEvent::new(Point::new(400.0, 300.0), delta, view.now()).into();
        gesture.handle_event(&event);
        idle(&mut gesture, &view, Duration::from_millis(30));
    }
    settle(&mut gesture, &view);
    info!("x domain {:?}, y domain {:?}", view.x_domain(), view.y_domain());
}

fn main() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    tap_and_hold();
    flick();
    pinch();
    wheel_zoom();
}
