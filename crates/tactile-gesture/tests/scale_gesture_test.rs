//! Scale gestures driven by touch and wheel events.

use std::rc::Rc;

use tactile_gesture::{
    ContinuousScale, EventType, GestureConfig, InputMethod, LinearScale, MomentumConfig, Rect,
    ScaleConfig, ScaleGesture, ZOOM0_ID, ZOOM1_ID,
};
use tactile_testing::*;

const FRAME: f64 = 16.0;

fn identity() -> LinearScale {
    LinearScale::new((0.0, 300.0), (0.0, 300.0))
}

fn touch_gesture(view: &Rc<TestView>, scale: ScaleConfig) -> ScaleGesture<TestView> {
    let config = GestureConfig::default().with_method(InputMethod::Touch);
    let mut gesture: ScaleGesture<TestView> =
        ScaleGesture::new("scale", config, MomentumConfig::default(), scale);
    gesture.set_view(Some(Rc::clone(view)));
    gesture
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn pinch_out_rescales_only_the_x_axis() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_x_scale(identity()));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0), (2, 200.0, 100.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 80.0, 100.0), (2, 220.0, 100.0)], 16.0));
    // Nothing is committed until the next frame.
    assert!(view.x_scale_writes().is_empty());
    assert!(gesture.needs_rescale());

    view.set_now(16.0);
    run_frames(&mut gesture, &view, FRAME, 1);
    let writes = view.x_scale_writes();
    assert_eq!(writes.len(), 1);
    assert!(view.y_scale_writes().is_empty());

    // Spreading the fingers zooms in: less domain fits the same range.
    let x = writes[0];
    assert!(approx(x.domain_span(), 300.0 / 1.4));
    assert!(approx(x.apply(&100.0), 80.0));
    assert!(approx(x.apply(&200.0), 220.0));
}

#[test]
fn single_finger_pans_the_bound_scales() {
    let view = Rc::new(
        TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0))
            .with_x_scale(identity())
            .with_y_scale(LinearScale::new((0.0, 300.0), (300.0, 0.0))),
    );
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 130.0, 90.0)], 16.0));
    run_frames(&mut gesture, &view, FRAME, 1);

    let x = view.current_x_scale().expect("x scale");
    let y = view.current_y_scale().expect("y scale");
    assert!(approx(x.slope(), 1.0));
    assert!(approx(x.apply(&100.0), 130.0));
    // Domain 200 sat under the finger on the inverted Y range.
    assert!(approx(y.apply(&200.0), 90.0));
}

#[test]
fn released_pinch_coasts_and_settles() {
    let view = Rc::new(
        TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0))
            .with_x_scale(identity())
            .with_y_scale(identity()),
    );
    let mut gesture = touch_gesture(&view, ScaleConfig::default().with_preserve_aspect_ratio(true));

    gesture.handle_event(&touch_start(&[(1, 100.0, 150.0), (2, 200.0, 150.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 90.0, 150.0), (2, 210.0, 150.0)], 10.0));
    gesture.handle_event(&touch_move(&[(1, 80.0, 150.0), (2, 220.0, 150.0)], 20.0));
    gesture.handle_event(&touch_end(&[(1, 80.0, 150.0), (2, 220.0, 150.0)], 20.0));
    view.set_now(20.0);
    assert_eq!(gesture.coast_count(), 2);

    let frames = run_frames(&mut gesture, &view, FRAME, 2_000);
    assert!(frames > 1 && frames < 2_000);
    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(gesture.input_count(), 0);
    assert!(!gesture.is_interacting());

    let x = view.current_x_scale().expect("x scale");
    let y = view.current_y_scale().expect("y scale");
    assert!(x.domain_span() < 300.0 / 1.4);
    assert!(approx(x.slope(), y.slope()));
    // The pinch center stays put.
    assert!((x.apply(&150.0) - 150.0).abs() < 1e-6);
}

#[test]
fn wheel_event_zooms_about_the_cursor() {
    let view = Rc::new(
        TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0))
            .with_x_scale(identity())
            .with_y_scale(identity()),
    );
    let mut gesture = touch_gesture(&view, ScaleConfig::default());
    assert!(view.is_listening(EventType::Wheel));

    gesture.handle_event(&wheel(150.0, 150.0, -10.0, 0.0));
    assert_eq!(gesture.coast_count(), 2);
    assert!(gesture.input(ZOOM0_ID).is_ok());
    assert!(gesture.input(ZOOM1_ID).is_ok());

    let frames = run_frames(&mut gesture, &view, FRAME, 2_000);
    assert!(frames < 2_000);
    assert_eq!(gesture.input_count(), 0);

    let x = view.current_x_scale().expect("x scale");
    let y = view.current_y_scale().expect("y scale");
    assert!(x.domain_span() < 300.0);
    assert!(y.domain_span() < 300.0);
    assert!((x.apply(&150.0) - 150.0).abs() < 1e-6);
    assert!((y.apply(&150.0) - 150.0).abs() < 1e-6);
}

#[test]
fn wheel_down_zooms_out() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_x_scale(identity()));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&wheel(150.0, 150.0, 10.0, 0.0));
    run_frames(&mut gesture, &view, FRAME, 2_000);
    let x = view.current_x_scale().expect("x scale");
    assert!(x.domain_span() > 300.0);
}

#[test]
fn touch_during_wheel_zoom_interrupts_it() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_x_scale(identity()));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&wheel(150.0, 150.0, -10.0, 0.0));
    run_frames(&mut gesture, &view, FRAME, 3);
    gesture.handle_event(&touch_start(&[(1, 40.0, 40.0)], view.now()));

    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(gesture.input_count(), 1);
    assert!(gesture.input("touch1").unwrap().is_pressing());
    assert_eq!(gesture.verify(), Ok(()));
}

#[test]
fn unmounting_drops_pending_rescale() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_x_scale(identity()));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 120.0, 100.0)], 16.0));
    gesture.set_view(None);

    assert!(!gesture.needs_rescale());
    gesture.animate(32.0);
    assert!(view.x_scale_writes().is_empty());
}

#[test]
fn vertical_pinch_rescales_only_the_y_axis() {
    let inverted = LinearScale::new((0.0, 300.0), (300.0, 0.0));
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_y_scale(inverted));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0), (2, 100.0, 200.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 100.0, 80.0), (2, 100.0, 220.0)], 16.0));
    view.set_now(16.0);
    run_frames(&mut gesture, &view, FRAME, 1);

    assert!(view.x_scale_writes().is_empty());
    let writes = view.y_scale_writes();
    assert_eq!(writes.len(), 1);
    let y = writes[0];
    assert!(approx(y.domain_span(), 300.0 / 1.4));
    assert!(!y.is_range_ascending());
    // Domain 200 sat under the upper finger on the inverted range.
    assert!(approx(y.apply(&200.0), 80.0));
    assert!(approx(y.apply(&100.0), 220.0));
}

#[test]
fn released_vertical_pinch_shares_its_momentum() {
    let inverted = LinearScale::new((0.0, 300.0), (300.0, 0.0));
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 300.0, 300.0)).with_y_scale(inverted));
    let mut gesture = touch_gesture(&view, ScaleConfig::default());

    // The upper finger moves at 1 px/ms, the lower at 0.5 px/ms.
    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0), (2, 100.0, 200.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 100.0, 90.0), (2, 100.0, 205.0)], 10.0));
    gesture.handle_event(&touch_move(&[(1, 100.0, 80.0), (2, 100.0, 210.0)], 20.0));
    gesture.handle_event(&touch_end(&[(1, 100.0, 80.0), (2, 100.0, 210.0)], 20.0));
    view.set_now(20.0);
    assert_eq!(gesture.coast_count(), 2);

    let upper = gesture.input("touch1").expect("touch1");
    let lower = gesture.input("touch2").expect("touch2");
    assert!(approx(upper.vy, -0.75));
    assert!(approx(lower.vy, 0.75));
    assert!(approx(upper.ay, -lower.ay));
    assert_eq!((upper.vx, lower.vx), (0.0, 0.0));

    let frames = run_frames(&mut gesture, &view, FRAME, 2_000);
    assert!(frames < 2_000);
    assert_eq!(gesture.input_count(), 0);
    assert!(view.x_scale_writes().is_empty());
    assert!(!view.y_scale_writes().is_empty());
}
