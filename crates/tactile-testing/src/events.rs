//! Shorthand builders for native events.

use tactile_geometry::Point;
use tactile_gesture::{
    InputType, MouseEvent, MouseEventKind, NativeEvent, PointerButton, PointerEvent,
    PointerEventKind, Touch, TouchEvent, TouchEventKind, WheelEvent,
};

fn mouse(kind: MouseEventKind, x: f64, y: f64, t: f64) -> NativeEvent {
    MouseEvent::new(kind, Point::new(x, y), t).into()
}

pub fn mouse_enter(x: f64, y: f64, t: f64) -> NativeEvent {
    mouse(MouseEventKind::Enter, x, y, t)
}

pub fn mouse_leave(x: f64, y: f64, t: f64) -> NativeEvent {
    mouse(MouseEventKind::Leave, x, y, t)
}

pub fn mouse_down(x: f64, y: f64, t: f64) -> NativeEvent {
    MouseEvent::new(MouseEventKind::Down, Point::new(x, y), t)
        .with_button(PointerButton::Primary)
        .into()
}

pub fn mouse_move(x: f64, y: f64, t: f64) -> NativeEvent {
    mouse(MouseEventKind::Move, x, y, t)
}

pub fn mouse_up(x: f64, y: f64, t: f64) -> NativeEvent {
    MouseEvent::new(MouseEventKind::Up, Point::new(x, y), t)
        .with_button(PointerButton::Primary)
        .into()
}

fn touches(kind: TouchEventKind, points: &[(i64, f64, f64)], t: f64) -> NativeEvent {
    let touches: Vec<Touch> = points
        .iter()
        .map(|&(id, x, y)| Touch::new(id, Point::new(x, y)))
        .collect();
    TouchEvent::new(kind, &touches, t).into()
}

/// Touch start for `(identifier, x, y)` contacts.
pub fn touch_start(points: &[(i64, f64, f64)], t: f64) -> NativeEvent {
    touches(TouchEventKind::Start, points, t)
}

pub fn touch_move(points: &[(i64, f64, f64)], t: f64) -> NativeEvent {
    touches(TouchEventKind::Move, points, t)
}

pub fn touch_end(points: &[(i64, f64, f64)], t: f64) -> NativeEvent {
    touches(TouchEventKind::End, points, t)
}

pub fn touch_cancel(points: &[(i64, f64, f64)], t: f64) -> NativeEvent {
    touches(TouchEventKind::Cancel, points, t)
}

pub fn pointer(
    kind: PointerEventKind,
    pointer_id: i64,
    pointer_type: InputType,
    x: f64,
    y: f64,
    t: f64,
) -> NativeEvent {
    PointerEvent::new(kind, pointer_id, pointer_type, Point::new(x, y), t).into()
}

pub fn wheel(x: f64, y: f64, delta_y: f64, t: f64) -> NativeEvent {
    WheelEvent::new(Point::new(x, y), delta_y, t).into()
}
