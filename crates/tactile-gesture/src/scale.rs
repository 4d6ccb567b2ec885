//! Scale manipulation: presses and coasts that pan and zoom the view's
//! continuous scales.
//!
//! Every active input holds the domain values that were under it when it
//! was anchored. Rescaling solves new domains that put those values back
//! under the inputs' current positions. Rescaling is deferred to the next
//! animation frame; event handlers only mark it as needed.

use std::f64::consts::FRAC_1_SQRT_2;
use std::marker::PhantomData;

use log::trace;
use smallvec::SmallVec;
use tactile_geometry::{Point, Rect};
use tactile_scale::{ContinuousScale, LinearScale};

use crate::config::{GestureConfig, MomentumConfig, ScaleConfig};
use crate::constants::{WHEEL_DELTA_FULL_SPEED, ZOOM0_ID, ZOOM1_ID, ZOOM_SPREAD};
use crate::event::{InputType, NativeEvent};
use crate::gesture::{Gesture, GestureMode, PressPhase};
use crate::input::InputId;
use crate::momentum::sign;
use crate::view::ScaleView;

/// Tolerance below which two anchors are treated as one point.
const ANCHOR_EPSILON: f64 = 1e-9;

pub struct ScaleMode<XS, YS> {
    momentum: MomentumConfig,
    scale: ScaleConfig,
    needs_rescale: bool,
    marker: PhantomData<fn() -> (XS, YS)>,
}

impl<XS, YS> ScaleMode<XS, YS> {
    pub fn new(momentum: MomentumConfig, scale: ScaleConfig) -> Self {
        Self {
            momentum,
            scale,
            needs_rescale: false,
            marker: PhantomData,
        }
    }

    pub fn momentum_config(&self) -> &MomentumConfig {
        &self.momentum
    }

    pub fn scale_config(&self) -> &ScaleConfig {
        &self.scale
    }

    pub fn needs_rescale(&self) -> bool {
        self.needs_rescale
    }
}

pub type ScaleGesture<V, XS = LinearScale, YS = LinearScale> = Gesture<V, ScaleMode<XS, YS>>;

impl<V, XS, YS> GestureMode<V> for ScaleMode<XS, YS>
where
    V: ScaleView<XS, YS> + ?Sized,
    XS: ContinuousScale,
    YS: ContinuousScale,
{
    type X = XS::Domain;
    type Y = YS::Domain;

    fn momentum(&self) -> Option<&MomentumConfig> {
        Some(&self.momentum)
    }

    fn wheel_enabled(&self) -> bool {
        self.scale.wheel
    }

    fn reset(&mut self) {
        self.needs_rescale = false;
    }

    fn on_press_update(gesture: &mut Gesture<V, Self>, id: &str, phase: PressPhase) {
        if phase == PressPhase::Begin {
            gesture.update_input_domain(id);
        }
        gesture.invalidate();
    }

    fn on_begin_coast(gesture: &mut Gesture<V, Self>, id: &str) {
        // With a solve pending the scales lag the input, and the domain
        // values it already carries are the ones that pair with its position.
        let has_domain = gesture
            .inputs
            .get(id)
            .is_some_and(|input| input.x_coord.is_some() || input.y_coord.is_some());
        if !(gesture.mode.needs_rescale && has_domain) {
            gesture.update_input_domain(id);
        }
        gesture.conserve_momentum(id);
        gesture.invalidate();
    }

    fn on_end_coast(gesture: &mut Gesture<V, Self>, id: &str) {
        if let Some(input) = gesture.inputs.get_mut(id) {
            input.disable_x = false;
            input.disable_y = false;
        }
        gesture.invalidate();
    }

    fn on_coast(gesture: &mut Gesture<V, Self>) {
        // Rescaled later in the same frame by `animate`.
        gesture.mode.needs_rescale = true;
    }

    fn integrate(gesture: &mut Gesture<V, Self>, t: f64) {
        let coasting = gesture.ids_where(|input| input.coasting);
        let [first, second] = coasting.as_slice() else {
            gesture.integrate_inputs(t);
            return;
        };
        let separation = |gesture: &Gesture<V, Self>| {
            match (gesture.inputs.get(first), gesture.inputs.get(second)) {
                (Some(a), Some(b)) => a.position().distance(b.position()),
                _ => 0.0,
            }
        };
        let before = separation(gesture);
        gesture.integrate_inputs(t);
        let after = separation(gesture);
        if before <= 0.0 {
            return;
        }
        let ratio = after / before;
        if !ratio.is_finite() {
            return;
        }
        for id in [first, second] {
            if let Some(input) = gesture.inputs.get_mut(id) {
                input.vx *= ratio;
                input.vy *= ratio;
                input.ax *= ratio;
                input.ay *= ratio;
            }
        }
    }

    fn animate(gesture: &mut Gesture<V, Self>, _t: f64) {
        if gesture.mode.needs_rescale {
            gesture.mode.needs_rescale = false;
            gesture.rescale();
        }
    }

    fn zoom(
        gesture: &mut Gesture<V, Self>,
        x: f64,
        y: f64,
        dz: f64,
        event: Option<&NativeEvent>,
    ) {
        gesture.zoom(x, y, dz, event);
    }
}

/// Range position of a client coordinate: its offset into the view, counted
/// from the low end of the range.
pub fn client_to_range<S: ContinuousScale>(scale: &S, view_origin: f64, client: f64) -> f64 {
    let offset = client - view_origin;
    let (start, end) = scale.range();
    if scale.is_range_ascending() {
        start + offset
    } else {
        end + offset
    }
}

/// Spreads two range positions symmetrically about their midpoint until
/// they are at least `distance_min` apart. Their order is preserved.
pub fn enforce_separation(p0: f64, p1: f64, distance_min: f64) -> (f64, f64) {
    let delta = p1 - p0;
    if delta.abs() >= distance_min {
        return (p0, p1);
    }
    let mid = (p0 + p1) / 2.0;
    let half = distance_min / 2.0;
    if delta >= 0.0 {
        (mid - half, mid + half)
    } else {
        (mid + half, mid - half)
    }
}

type AxisPoints<D> = SmallVec<[(D, f64); 2]>;

fn solve_points<S: ContinuousScale>(scale: &S, distance_min: f64, points: &AxisPoints<S::Domain>) -> Option<S> {
    match points.as_slice() {
        [] => None,
        [(d0, r0)] => Some(scale.solve_domain((d0, *r0), None)),
        [(d0, r0), (d1, r1), ..] => {
            let (r0, r1) = enforce_separation(*r0, *r1, distance_min);
            Some(scale.solve_domain((d0, r0), Some((d1, r1))))
        }
    }
}

/// Zoom factor between two scales, measured across two domain values.
fn zoom_ratio<S: ContinuousScale>(old: &S, new: &S, c0: &S::Domain, c1: &S::Domain) -> f64 {
    let before = old.apply(c1) - old.apply(c0);
    let after = new.apply(c1) - new.apply(c0);
    let ratio = after / before;
    if before == 0.0 || !ratio.is_finite() || ratio <= 0.0 {
        1.0
    } else {
        ratio
    }
}

/// Solves `scale` so that `coord` lands on `target` and the zoom changes by
/// `ratio`.
fn follow_ratio<S: ContinuousScale>(
    scale: &S,
    coord: &S::Domain,
    target: f64,
    ratio: f64,
    probe: f64,
) -> S {
    let other = scale.inverse(scale.apply(coord) + probe);
    scale.solve_domain((coord, target), Some((&other, target + ratio * probe)))
}

impl<V, XS, YS> Gesture<V, ScaleMode<XS, YS>>
where
    V: ScaleView<XS, YS> + ?Sized,
    XS: ContinuousScale,
    YS: ContinuousScale,
{
    pub fn new(
        name: impl Into<String>,
        config: GestureConfig,
        momentum: MomentumConfig,
        scale: ScaleConfig,
    ) -> Self {
        Self::with_mode(name, config, ScaleMode::new(momentum, scale))
    }

    pub fn needs_rescale(&self) -> bool {
        self.mode.needs_rescale
    }

    fn invalidate(&mut self) {
        self.mode.needs_rescale = true;
        self.require_animate();
    }

    /// Range position of a client X coordinate, or `None` without a view or
    /// X scale.
    pub fn client_to_range_x(&self, x: f64) -> Option<f64> {
        let view = self.view.as_deref()?;
        let scale = view.x_scale()?;
        Some(client_to_range(&scale, view.client_bounds().x_min(), x))
    }

    pub fn client_to_range_y(&self, y: f64) -> Option<f64> {
        let view = self.view.as_deref()?;
        let scale = view.y_scale()?;
        Some(client_to_range(&scale, view.client_bounds().y_min(), y))
    }

    /// Recomputes the domain values under the anchor of `id` from the
    /// view's current scales.
    pub fn update_input_domain(&mut self, id: &str) {
        let Some(view) = self.view.clone() else {
            return;
        };
        let bounds = view.client_bounds();
        let (xs, ys) = (view.x_scale(), view.y_scale());
        let Some(input) = self.inputs.get_mut(id) else {
            return;
        };
        input.x_coord = xs.map(|scale| scale.inverse(client_to_range(&scale, bounds.x_min(), input.x0)));
        input.y_coord = ys.map(|scale| scale.inverse(client_to_range(&scale, bounds.y_min(), input.y0)));
    }

    /// Solves and commits new scales from the two oldest active inputs.
    pub fn rescale(&mut self) {
        let Some(view) = self.view.clone() else {
            return;
        };
        let (xs, ys) = (view.x_scale(), view.y_scale());
        if xs.is_none() && ys.is_none() {
            return;
        }
        let mut active: SmallVec<[(InputId, f64); 4]> = self
            .inputs
            .values()
            .filter(|input| input.pressing || input.coasting)
            .map(|input| (input.id().clone(), input.t0))
            .collect();
        if active.is_empty() {
            return;
        }
        // Stable: inputs anchored together keep creation order.
        active.sort_by(|a, b| a.1.total_cmp(&b.1));
        let ids: SmallVec<[InputId; 4]> = active.into_iter().map(|(id, _)| id).collect();
        let bounds = view.client_bounds();
        trace!("{}: rescale with {:?}", self.name, ids.as_slice());

        let changed = match (xs, ys) {
            (Some(xs), Some(ys)) if ids.len() >= 2 && self.mode.scale.preserve_aspect_ratio => {
                self.rescale_radial(&*view, bounds, xs, ys, &ids)
            }
            (Some(xs), Some(ys)) => self.rescale_xy(&*view, bounds, xs, ys, &ids),
            (Some(xs), None) => self.rescale_x(&*view, bounds, xs, &ids),
            (None, Some(ys)) => self.rescale_y(&*view, bounds, ys, &ids),
            (None, None) => false,
        };
        if changed && self.mode.scale.preserve_aspect_ratio {
            self.reanchor(&ids[ids.len().min(2)..]);
        }
    }

    fn x_points(&self, xs: &XS, bounds: Rect, ids: &[InputId]) -> Option<AxisPoints<XS::Domain>> {
        let mut points = AxisPoints::new();
        for id in ids.iter().take(2) {
            let input = self.inputs.get(id)?;
            if input.disable_x {
                return None;
            }
            if let Some(coord) = &input.x_coord {
                points.push((coord.clone(), client_to_range(xs, bounds.x_min(), input.x)));
            }
        }
        Some(points)
    }

    fn y_points(&self, ys: &YS, bounds: Rect, ids: &[InputId]) -> Option<AxisPoints<YS::Domain>> {
        let mut points = AxisPoints::new();
        for id in ids.iter().take(2) {
            let input = self.inputs.get(id)?;
            if input.disable_y {
                return None;
            }
            if let Some(coord) = &input.y_coord {
                points.push((coord.clone(), client_to_range(ys, bounds.y_min(), input.y)));
            }
        }
        Some(points)
    }

    fn rescale_x(&mut self, view: &V, bounds: Rect, xs: XS, ids: &[InputId]) -> bool {
        let distance_min = self.mode.scale.distance_min;
        let next = self
            .x_points(&xs, bounds, ids)
            .and_then(|points| solve_points(&xs, distance_min, &points));
        match next {
            Some(next) if next != xs => {
                view.set_x_scale(next);
                true
            }
            _ => false,
        }
    }

    fn rescale_y(&mut self, view: &V, bounds: Rect, ys: YS, ids: &[InputId]) -> bool {
        let distance_min = self.mode.scale.distance_min;
        let next = self
            .y_points(&ys, bounds, ids)
            .and_then(|points| solve_points(&ys, distance_min, &points));
        match next {
            Some(next) if next != ys => {
                view.set_y_scale(next);
                true
            }
            _ => false,
        }
    }

    fn rescale_xy(&mut self, view: &V, bounds: Rect, xs: XS, ys: YS, ids: &[InputId]) -> bool {
        let x_changed = self.rescale_x(view, bounds, xs, ids);
        let y_changed = self.rescale_y(view, bounds, ys, ids);
        x_changed || y_changed
    }

    /// Aspect-locked two-input solve.
    ///
    /// Each input's motion since its anchor is split into a radial part,
    /// along the line between the two anchors, and a tangential part across
    /// it. The tangential parts are averaged so both inputs pan together,
    /// which keeps the result a uniform zoom plus translation. The axis with
    /// the wider anchor spread is solved from both inputs; the other axis
    /// follows with the same zoom factor.
    fn rescale_radial(&mut self, view: &V, bounds: Rect, xs: XS, ys: YS, ids: &[InputId]) -> bool {
        let (Some(a), Some(b)) = (self.inputs.get(&ids[0]), self.inputs.get(&ids[1])) else {
            return false;
        };
        let coords = (&a.x_coord, &a.y_coord, &b.x_coord, &b.y_coord);
        let (Some(ax_coord), Some(ay_coord), Some(bx_coord), Some(by_coord)) = coords else {
            return self.rescale_xy(view, bounds, xs, ys, ids);
        };
        if a.disable_x || a.disable_y || b.disable_x || b.disable_y {
            return self.rescale_xy(view, bounds, xs, ys, ids);
        }

        let to_range = |p: Point| {
            Point::new(
                client_to_range(&xs, bounds.x_min(), p.x),
                client_to_range(&ys, bounds.y_min(), p.y),
            )
        };
        let (a0, b0) = (to_range(a.anchor()), to_range(b.anchor()));
        let (a1, b1) = (to_range(a.position()), to_range(b.position()));
        let axis = b0 - a0;
        if axis.length() < ANCHOR_EPSILON {
            return self.rescale_xy(view, bounds, xs, ys, ids);
        }
        let u = axis.normalize();
        let n = u.perp();

        let (da, db) = (a1 - a0, b1 - b0);
        let tangential = (da.dot(n) + db.dot(n)) / 2.0;
        let qa = a0 + u * da.dot(u) + n * tangential;
        let qb = b0 + u * db.dot(u) + n * tangential;

        let distance_min = self.mode.scale.distance_min;
        let probe = axis.length();
        let (next_x, next_y) = if axis.x.abs() >= axis.y.abs() {
            let (ra, rb) = enforce_separation(qa.x, qb.x, distance_min);
            let next_x = xs.solve_domain((ax_coord, ra), Some((bx_coord, rb)));
            let ratio = zoom_ratio(&xs, &next_x, ax_coord, bx_coord);
            let next_y = follow_ratio(&ys, ay_coord, qa.y, ratio, probe);
            (next_x, next_y)
        } else {
            let (ra, rb) = enforce_separation(qa.y, qb.y, distance_min);
            let next_y = ys.solve_domain((ay_coord, ra), Some((by_coord, rb)));
            let ratio = zoom_ratio(&ys, &next_y, ay_coord, by_coord);
            let next_x = follow_ratio(&xs, ax_coord, qa.x, ratio, probe);
            (next_x, next_y)
        };

        // Momentum follows the same projection.
        let (va, vb) = (a.velocity(), b.velocity());
        let tangential_v = (va.dot(n) + vb.dot(n)) / 2.0;
        for (id, v) in [(&ids[0], va), (&ids[1], vb)] {
            if let Some(input) = self.inputs.get_mut(id).filter(|input| input.coasting) {
                let projected = u * v.dot(u) + n * tangential_v;
                let decel = input.acceleration().length();
                let opposing = -(projected.normalize() * decel);
                input.vx = projected.x;
                input.vy = projected.y;
                input.ax = opposing.x;
                input.ay = opposing.y;
            }
        }

        let mut changed = false;
        if next_x != xs {
            view.set_x_scale(next_x);
            changed = true;
        }
        if next_y != ys {
            view.set_y_scale(next_y);
            changed = true;
        }
        changed
    }

    /// Moves the anchors of `ids` to their current positions and reads
    /// their domain values from the freshly committed scales.
    fn reanchor(&mut self, ids: &[InputId]) {
        for id in ids {
            if let Some(input) = self.inputs.get_mut(id) {
                input.x0 = input.x;
                input.y0 = input.y;
            }
            self.update_input_domain(id);
        }
    }

    /// Evens out momentum between `id`, which just started coasting, and an
    /// input that was already coasting.
    pub fn conserve_momentum(&mut self, id: &str) {
        let Some(other) = self
            .inputs
            .values()
            .find(|input| input.coasting && input.id().as_str() != id)
            .map(|input| input.id().clone())
        else {
            return;
        };
        let Some(view) = self.view.as_deref() else {
            return;
        };
        match (view.x_scale().is_some(), view.y_scale().is_some()) {
            (true, true) => self.distribute_xy_momentum(id, &other),
            (true, false) => self.distribute_x_momentum(id, &other),
            (false, true) => self.distribute_y_momentum(id, &other),
            (false, false) => {}
        }
    }

    /// Averages speed and deceleration magnitudes; each input keeps its own
    /// direction.
    pub fn distribute_xy_momentum(&mut self, a: &str, b: &str) {
        let (Some(ia), Some(ib)) = (self.inputs.get(a), self.inputs.get(b)) else {
            return;
        };
        let speed = (ia.velocity().length() + ib.velocity().length()) / 2.0;
        let decel = (ia.acceleration().length() + ib.acceleration().length()) / 2.0;
        for id in [a, b] {
            if let Some(input) = self.inputs.get_mut(id) {
                let v = input.velocity().normalize() * speed;
                let acc = input.acceleration().normalize() * decel;
                input.vx = v.x;
                input.vy = v.y;
                input.ax = acc.x;
                input.ay = acc.y;
            }
        }
    }

    pub fn distribute_x_momentum(&mut self, a: &str, b: &str) {
        let (Some(ia), Some(ib)) = (self.inputs.get(a), self.inputs.get(b)) else {
            return;
        };
        let speed = (ia.vx.abs() + ib.vx.abs()) / 2.0;
        let decel = (ia.ax.abs() + ib.ax.abs()) / 2.0;
        for id in [a, b] {
            if let Some(input) = self.inputs.get_mut(id) {
                input.vx = sign(input.vx) * speed;
                input.ax = sign(input.ax) * decel;
            }
        }
    }

    pub fn distribute_y_momentum(&mut self, a: &str, b: &str) {
        let (Some(ia), Some(ib)) = (self.inputs.get(a), self.inputs.get(b)) else {
            return;
        };
        let speed = (ia.vy.abs() + ib.vy.abs()) / 2.0;
        let decel = (ia.ay.abs() + ib.ay.abs()) / 2.0;
        for id in [a, b] {
            if let Some(input) = self.inputs.get_mut(id) {
                input.vy = sign(input.vy) * speed;
                input.ay = sign(input.ay) * decel;
            }
        }
    }

    /// Stops horizontal momentum, e.g. after the host clamped the X scale.
    /// Coasting inputs skip the X axis when rescaling until their coast
    /// ends.
    pub fn neutralize_x(&mut self) {
        for input in self.inputs.values_mut().filter(|input| input.coasting) {
            input.disable_x = true;
            input.vx = 0.0;
            input.ax = 0.0;
        }
    }

    pub fn neutralize_y(&mut self) {
        for input in self.inputs.values_mut().filter(|input| input.coasting) {
            input.disable_y = true;
            input.vy = 0.0;
            input.ay = 0.0;
        }
    }

    /// Turns a wheel delta into a synthetic two-input pinch about `(x, y)`.
    ///
    /// `dz < 0` moves the synthetic inputs apart (zooming in), `dz > 0`
    /// moves them together. Repeated deltas adjust the running pinch
    /// instead of restarting it.
    pub fn zoom(&mut self, x: f64, y: f64, dz: f64, event: Option<&NativeEvent>) {
        if dz == 0.0 || !self.mode.scale.wheel {
            return;
        }
        let MomentumConfig {
            acceleration,
            velocity_max,
            ..
        } = self.mode.momentum;
        // Outward unit directions of the two inputs along the diagonal.
        let outward = [
            (ZOOM0_ID, Point::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
            (ZOOM1_ID, Point::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
        ];

        if self.inputs.contains_key(ZOOM0_ID) && self.inputs.contains_key(ZOOM1_ID) {
            for (id, direction) in outward {
                if let Some(input) = self.inputs.get_mut(id) {
                    let speed = input.velocity().dot(direction) - dz * velocity_max / WHEEL_DELTA_FULL_SPEED;
                    let speed = speed.clamp(-velocity_max, velocity_max);
                    let v = direction * speed;
                    let a = -(v.normalize() * acceleration);
                    input.vx = v.x;
                    input.vy = v.y;
                    input.ax = a.x;
                    input.ay = a.y;
                }
            }
            trace!("{}: zoom continued by {dz}", self.name);
            self.invalidate();
            return;
        }

        // A lone survivor from an earlier pinch is retired first.
        self.end_coast(ZOOM0_ID, event);
        self.end_coast(ZOOM1_ID, event);

        let t = match (event, self.view.as_deref()) {
            (Some(event), _) => event.time_stamp(),
            (None, Some(view)) => view.update_time(),
            (None, None) => 0.0,
        };
        let speed = 0.5 * velocity_max;
        let distance = ZOOM_SPREAD * speed * speed / (2.0 * acceleration);
        let heading = if dz < 0.0 { 1.0 } else { -1.0 };
        trace!("{}: zoom {dz} about ({x}, {y})", self.name);
        for (id, direction) in outward {
            let position = Point::new(x, y) + direction * distance;
            let v = direction * (heading * speed);
            let input = self.get_or_create_input(id, InputType::Mouse, false, position.x, position.y, t);
            input.update(position.x, position.y, t);
            input.vx = v.x;
            input.vy = v.y;
            self.begin_coast(id, event);
            self.clear_if_inert(id);
        }
    }
}
