//! Coasting driven through native events and animation frames.

use std::rc::Rc;

use tactile_gesture::{
    EventType, GestureConfig, InputMethod, MomentumConfig, MomentumGesture, Rect, MOUSE_ID,
};
use tactile_testing::*;

const FRAME: f64 = 16.0;

fn setup(acceleration: f64) -> (Rc<TestView>, RecordingObserver, MomentumGesture<TestView>) {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
    let observer = RecordingObserver::new();
    let config = GestureConfig::default().with_method(InputMethod::Mouse);
    let momentum = MomentumConfig::default().with_acceleration(acceleration);
    let mut gesture: MomentumGesture<TestView> =
        MomentumGesture::new("momentum", config, momentum).with_observer(observer.clone());
    gesture.set_view(Some(Rc::clone(&view)));
    (view, observer, gesture)
}

/// Drags right at 1 px/ms and releases at t = 20.
fn flick(gesture: &mut MomentumGesture<TestView>, view: &TestView) {
    gesture.handle_event(&mouse_down(0.0, 0.0, 0.0));
    gesture.handle_event(&mouse_move(10.0, 0.0, 10.0));
    gesture.handle_event(&mouse_move(20.0, 0.0, 20.0));
    gesture.handle_event(&mouse_up(20.0, 0.0, 20.0));
    view.set_now(20.0);
}

#[test]
fn flick_decays_to_rest_on_the_expected_frame() {
    let (view, observer, mut gesture) = setup(0.001);
    flick(&mut gesture, &view);
    assert_eq!(observer.count("begin_coast"), 1);
    assert_eq!(observer.count("press"), 1);

    let frames = run_frames(&mut gesture, &view, FRAME, 1_000);
    // 1 px/ms at 0.001 px/ms² stops after 1000 ms.
    assert_eq!(frames, (1000.0_f64 / FRAME).ceil() as usize);
    assert_eq!(observer.count("coast"), frames);
    assert_eq!(observer.count("end_coast"), 1);

    let log = observer.log();
    let end = observer.position("end_coast:mouse").expect("end_coast");
    assert_eq!(log[end - 1], "coast");
    let transitions = observer.transitions();
    assert_eq!(
        transitions[transitions.len() - 3..],
        ["end_coast:mouse", "stop_coasting", "stop_interacting"]
    );
    assert!(!gesture.is_interacting());
    assert_eq!(gesture.input_count(), 0);
}

#[test]
fn coast_travels_the_stopping_distance() {
    let (view, _observer, mut gesture) = setup(0.001);
    gesture.handle_event(&mouse_enter(0.0, 0.0, 0.0));
    flick(&mut gesture, &view);

    let mut last_vx = f64::INFINITY;
    while view.take_animate_request() {
        let t = view.advance(FRAME);
        gesture.animate(t);
        let input = gesture.input(MOUSE_ID).expect("hovering input");
        assert!(input.vx >= 0.0 && input.vx < last_vx);
        last_vx = input.vx;
    }
    let input = gesture.input(MOUSE_ID).expect("hovering input");
    assert!(!input.is_coasting());
    // v² / 2a past the release point.
    assert!((input.x - 520.0).abs() < 1e-6);
    assert_eq!(input.y, 0.0);
}

#[test]
fn frames_are_bounded_by_speed_over_deceleration() {
    for (distance, acceleration) in [(5.0, 0.00175), (12.0, 0.0005), (30.0, 0.002)] {
        let (view, _observer, mut gesture) = setup(acceleration);
        gesture.handle_event(&mouse_down(0.0, 0.0, 0.0));
        gesture.handle_event(&mouse_move(distance, 0.0, 20.0));
        gesture.handle_event(&mouse_up(distance, 0.0, 20.0));
        view.set_now(20.0);

        let speed = (distance / 20.0_f64).min(MomentumConfig::default().velocity_max);
        let bound = (speed / (acceleration * FRAME)).ceil() as usize;
        let frames = run_frames(&mut gesture, &view, FRAME, 10_000);
        assert!(frames <= bound, "{frames} > {bound}");
        assert_eq!(gesture.coast_count(), 0);
    }
}

#[test]
fn press_during_coast_catches_the_input() {
    let (view, observer, mut gesture) = setup(0.001);
    flick(&mut gesture, &view);
    run_frames(&mut gesture, &view, FRAME, 5);
    assert_eq!(gesture.coast_count(), 1);

    gesture.handle_event(&mouse_down(100.0, 0.0, view.now()));
    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(observer.count("end_coast"), 1);
    let input = gesture.input(MOUSE_ID).expect("pressed input");
    assert!(input.is_pressing());
    assert_eq!(input.velocity().length(), 0.0);
    // Interaction never stopped between the coast and the new press.
    assert_eq!(observer.count("stop_interacting"), 0);
    assert!(gesture.is_interacting());
}

#[test]
fn slow_release_does_not_coast() {
    let (view, observer, mut gesture) = setup(0.001);
    gesture.handle_event(&mouse_down(0.0, 0.0, 0.0));
    gesture.handle_event(&mouse_move(20.0, 0.0, 20.0));
    // Held still past the sampling window.
    gesture.handle_event(&mouse_up(20.0, 0.0, 200.0));
    assert_eq!(observer.count("begin_coast"), 0);
    assert_eq!(run_frames(&mut gesture, &view, FRAME, 10), 0);
    assert_eq!(gesture.input_count(), 0);
}

#[test]
fn vetoed_coast_stops_in_place() {
    let (view, observer, mut gesture) = setup(0.001);
    observer.set_veto_coast(true);
    flick(&mut gesture, &view);
    assert_eq!(observer.count("will_begin_coast"), 1);
    assert_eq!(observer.count("begin_coast"), 0);
    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(gesture.input_count(), 0);
    assert_eq!(view.animate_requests(), 0);
}

#[test]
fn unmount_mid_coast_is_silent() {
    let (view, observer, mut gesture) = setup(0.001);
    flick(&mut gesture, &view);
    run_frames(&mut gesture, &view, FRAME, 3);

    gesture.set_view(None);
    assert_eq!(observer.count("end_coast"), 0);
    assert_eq!(gesture.coast_count(), 0);
    assert!(!gesture.is_interacting());
    gesture.animate(view.advance(FRAME));
    assert_eq!(observer.count("coast"), 3);
}

#[test]
fn two_fingers_coast_independently() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
    let observer = RecordingObserver::new();
    let config = GestureConfig::default().with_method(InputMethod::Touch);
    let mut gesture: MomentumGesture<TestView> =
        MomentumGesture::new("touch", config, MomentumConfig::default().with_acceleration(0.001))
            .with_observer(observer.clone());
    gesture.set_view(Some(Rc::clone(&view)));

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0), (2, 300.0, 100.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 110.0, 100.0), (2, 300.0, 90.0)], 20.0));
    gesture.handle_event(&touch_end(&[(1, 110.0, 100.0), (2, 300.0, 90.0)], 20.0));
    view.set_now(20.0);
    assert_eq!(gesture.coast_count(), 2);
    assert_eq!(observer.count("start_coasting"), 1);

    let first = gesture.input("touch1").expect("touch1");
    let second = gesture.input("touch2").expect("touch2");
    assert_eq!((first.vx, first.vy), (0.5, 0.0));
    assert_eq!((second.vx, second.vy), (0.0, -0.5));
    assert_eq!(second.ay, 0.001);

    run_frames(&mut gesture, &view, FRAME, 1_000);
    assert_eq!(observer.count("end_coast"), 2);
    assert_eq!(observer.count("stop_coasting"), 1);
    assert_eq!(gesture.verify(), Ok(()));
}

#[test]
fn cancel_resets_presses_and_coasts() {
    let view = Rc::new(TestView::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
    let observer = RecordingObserver::new();
    let config = GestureConfig::default().with_method(InputMethod::Touch);
    let mut gesture: MomentumGesture<TestView> =
        MomentumGesture::new("touch", config, MomentumConfig::default())
            .with_observer(observer.clone());
    gesture.set_view(Some(Rc::clone(&view)));

    gesture.handle_event(&touch_start(&[(1, 100.0, 100.0), (2, 300.0, 100.0)], 0.0));
    gesture.handle_event(&touch_move(&[(1, 120.0, 100.0)], 20.0));
    gesture.handle_event(&touch_end(&[(1, 120.0, 100.0)], 20.0));
    view.set_now(20.0);
    assert!(gesture.input("touch1").unwrap().is_coasting());
    assert!(gesture.input("touch2").unwrap().is_pressing());
    assert_eq!((gesture.press_count(), gesture.coast_count()), (1, 1));
    let presses = observer.count("press");

    gesture.cancel(None);
    assert_eq!(gesture.press_count(), 0);
    assert_eq!(gesture.coast_count(), 0);
    assert_eq!(gesture.hover_count(), 0);
    assert_eq!(gesture.input_count(), 0);
    assert!(!gesture.is_interacting());
    assert_eq!(observer.count("cancel_press"), 1);
    assert_eq!(observer.count("end_coast"), 1);
    // Cancelled presses are not taps.
    assert_eq!(observer.count("press"), presses);
    assert_eq!(observer.count("stop_interacting"), 1);
    assert!(!view.is_listening(EventType::TouchMove));
    assert_eq!(gesture.verify(), Ok(()));
}
