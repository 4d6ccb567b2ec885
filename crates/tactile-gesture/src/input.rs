//! Per-contact input records.

use std::borrow::Borrow;
use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use smallvec::SmallVec;
use tactile_geometry::Point;

use crate::constants::VELOCITY_EPSILON;
use crate::event::{InputType, Modifiers, PointerButton, PointerButtons};
use crate::view::TimerId;

/// Identifies one input within a gesture, e.g. `"mouse"` or `"touch3"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(Rc<str>);

impl InputId {
    pub fn new(id: &str) -> Self {
        Self(Rc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for InputId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InputId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InputId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InputId {
    fn from(id: String) -> Self {
        Self(Rc::from(id))
    }
}

impl fmt::Debug for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device fields copied from the latest native event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputDetail {
    pub screen: Point,
    pub button: Option<PointerButton>,
    pub buttons: PointerButtons,
    pub modifiers: Modifiers,
    pub width: f64,
    pub height: f64,
    pub pressure: f64,
    pub tangential_pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    x: f64,
    y: f64,
    t: f64,
}

/// State of one contact: mouse pointer, finger, pen, or synthetic zoom input.
///
/// `X` and `Y` are the domain types of the scales a scale gesture drives;
/// other gestures leave them as `()`.
#[derive(Clone, Debug)]
pub struct GestureInput<X = (), Y = ()> {
    input_id: InputId,
    input_type: InputType,
    is_primary: bool,

    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub x0: f64,
    pub y0: f64,
    pub t0: f64,
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,

    /// Velocity in px/ms.
    pub vx: f64,
    pub vy: f64,
    /// Acceleration in px/ms².
    pub ax: f64,
    pub ay: f64,

    pub(crate) hovering: bool,
    pub(crate) pressing: bool,
    pub(crate) coasting: bool,
    default_prevented: Cell<bool>,

    /// Momentum on the axis was stopped by the host; skip it when rescaling.
    pub disable_x: bool,
    pub disable_y: bool,

    /// Domain value under the anchor position.
    pub x_coord: Option<X>,
    pub y_coord: Option<Y>,

    pub detail: InputDetail,

    pub(crate) hold_timer: Option<TimerId>,
    path: SmallVec<[Sample; 8]>,
}

impl<X, Y> GestureInput<X, Y> {
    pub fn new(
        input_id: InputId,
        input_type: InputType,
        is_primary: bool,
        x: f64,
        y: f64,
        t: f64,
    ) -> Self {
        Self {
            input_id,
            input_type,
            is_primary,
            x,
            y,
            t,
            x0: x,
            y0: y,
            t0: t,
            dx: 0.0,
            dy: 0.0,
            dt: 0.0,
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            ay: 0.0,
            hovering: false,
            pressing: false,
            coasting: false,
            default_prevented: Cell::new(false),
            disable_x: false,
            disable_y: false,
            x_coord: None,
            y_coord: None,
            detail: InputDetail::default(),
            hold_timer: None,
            path: SmallVec::new(),
        }
    }

    pub fn id(&self) -> &InputId {
        &self.input_id
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    pub fn is_coasting(&self) -> bool {
        self.coasting
    }

    /// True when the record no longer hovers, presses or coasts.
    pub fn is_inert(&self) -> bool {
        !self.hovering && !self.pressing && !self.coasting
    }

    /// Suppresses the `press` callback that would follow the current press.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub(crate) fn clear_default_prevented(&self) {
        self.default_prevented.set(false);
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    pub fn acceleration(&self) -> Point {
        Point::new(self.ax, self.ay)
    }

    /// Moves the input to a new sample, recording the deltas.
    pub fn update(&mut self, x: f64, y: f64, t: f64) {
        self.dx = x - self.x;
        self.dy = y - self.y;
        self.dt = t - self.t;
        self.x = x;
        self.y = y;
        self.t = t;
    }

    /// Makes the current sample the anchor and zeroes the deltas.
    pub fn set_anchor(&mut self) {
        self.x0 = self.x;
        self.y0 = self.y;
        self.t0 = self.t;
        self.dx = 0.0;
        self.dy = 0.0;
        self.dt = 0.0;
    }

    /// Forgets kinematic history, e.g. when a new press starts.
    pub fn reset_momentum(&mut self) {
        self.path.clear();
        self.vx = 0.0;
        self.vy = 0.0;
        self.ax = 0.0;
        self.ay = 0.0;
    }

    /// Appends the current sample to the velocity path and drops samples
    /// older than `hysteresis` milliseconds, keeping at least one.
    pub fn update_position(&mut self, hysteresis: f64) {
        self.path.push(Sample {
            x: self.x,
            y: self.y,
            t: self.t,
        });
        while self.path.len() > 1 && self.t - self.path[0].t > hysteresis {
            self.path.remove(0);
        }
    }

    /// Derives velocity across the sample path, clamped to `velocity_max`
    /// without changing direction.
    pub fn derive_velocity(&mut self, velocity_max: f64) {
        let (Some(first), Some(last)) = (self.path.first(), self.path.last()) else {
            self.vx = 0.0;
            self.vy = 0.0;
            return;
        };
        let dt = last.t - first.t;
        if self.path.len() < 2 || dt <= 0.0 {
            self.vx = 0.0;
            self.vy = 0.0;
            return;
        }

        let mut vx = (last.x - first.x) / dt;
        let mut vy = (last.y - first.y) / dt;
        let v2 = vx * vx + vy * vy;
        if v2 > velocity_max * velocity_max {
            let v = v2.sqrt();
            vx = vx * velocity_max / v;
            vy = vy * velocity_max / v;
        }
        self.vx = vx;
        self.vy = vy;
    }

    /// Advances a coasting input to time `t`. Velocity decays by the
    /// acceleration and stops at zero; an axis that stops loses its
    /// acceleration.
    pub fn integrate_velocity(&mut self, t: f64) {
        let dt = t - self.t;
        if dt <= 0.0 {
            return;
        }
        let (x, vx, ax) = integrate_axis(self.x, self.vx, self.ax, dt);
        let (y, vy, ay) = integrate_axis(self.y, self.vy, self.ay, dt);
        self.dx = x - self.x;
        self.dy = y - self.y;
        self.dt = dt;
        self.x = x;
        self.y = y;
        self.t = t;
        self.vx = vx;
        self.vy = vy;
        self.ax = ax;
        self.ay = ay;
    }
}

/// Returns `(position, velocity, acceleration)` after `dt`.
fn integrate_axis(x: f64, v: f64, a: f64, dt: f64) -> (f64, f64, f64) {
    if a == 0.0 {
        return (x + v * dt, v, 0.0);
    }
    if v == 0.0 {
        return (x, 0.0, 0.0);
    }
    let v1 = v + a * dt;
    if v1.abs() <= VELOCITY_EPSILON || (v1 < 0.0) != (v < 0.0) {
        // Stop exactly where the velocity reaches zero.
        let te = (-v / a).clamp(0.0, dt);
        (x + v * te + 0.5 * a * te * te, 0.0, 0.0)
    } else {
        (x + v * dt + 0.5 * a * dt * dt, v1, a)
    }
}
