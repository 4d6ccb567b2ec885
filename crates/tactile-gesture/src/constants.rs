//! Default thresholds and physics constants for gesture recognition.
//!
//! Distances are client pixels and times are milliseconds, matching the
//! timestamps carried by native events.

/// Delay before a held press fires `long_press`.
pub const DEFAULT_HOLD_DELAY: f64 = 400.0;

/// Hold timers that fire later than this multiple of the hold delay are
/// ignored. Timers fire very late when the host was suspended.
pub const HOLD_DELAY_TOLERANCE: f64 = 1.5;

/// Window of position samples used to derive velocity.
pub const DEFAULT_HYSTERESIS: f64 = 67.0;

/// Deceleration applied to coasting inputs, in px/ms².
pub const DEFAULT_ACCELERATION: f64 = 0.00175;

/// Maximum derived velocity, in px/ms.
pub const DEFAULT_VELOCITY_MAX: f64 = 1.75;

/// Minimum range-space separation between two inputs driving a two-point
/// scale solve.
pub const DEFAULT_DISTANCE_MIN: f64 = 10.0;

/// Velocities below this magnitude are treated as stopped.
pub const VELOCITY_EPSILON: f64 = 1e-9;

/// Wheel delta that maps to a full `velocity_max` change of zoom speed.
pub const WHEEL_DELTA_FULL_SPEED: f64 = 100.0;

/// Ratio of the synthetic zoom inputs' distance from the zoom center to the
/// distance a single coast travels.
pub const ZOOM_SPREAD: f64 = 2.0;

/// Input id of the first synthetic wheel-zoom input.
pub const ZOOM0_ID: &str = "zoom0";

/// Input id of the second synthetic wheel-zoom input.
pub const ZOOM1_ID: &str = "zoom1";

/// Input id of the single mouse input.
pub const MOUSE_ID: &str = "mouse";
