//! Gesture configuration.

use crate::constants::{
    DEFAULT_ACCELERATION, DEFAULT_DISTANCE_MIN, DEFAULT_HOLD_DELAY, DEFAULT_HYSTERESIS,
    DEFAULT_VELOCITY_MAX,
};

/// Which native event family a gesture listens to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMethod {
    /// Picks the best family the platform supports.
    #[default]
    Auto,
    Pointer,
    Touch,
    Mouse,
}

/// Event families the host platform can deliver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformSupport {
    pub pointer_events: bool,
    pub touch_events: bool,
}

impl PlatformSupport {
    /// A platform that only delivers mouse events.
    pub const MOUSE_ONLY: Self = Self {
        pointer_events: false,
        touch_events: false,
    };
}

impl Default for PlatformSupport {
    fn default() -> Self {
        Self {
            pointer_events: true,
            touch_events: false,
        }
    }
}

impl InputMethod {
    /// Resolves `Auto` against the platform: pointer events are preferred,
    /// then touch, then mouse. Explicit methods are returned unchanged.
    pub fn resolve(self, platform: PlatformSupport) -> InputMethod {
        match self {
            InputMethod::Auto if platform.pointer_events => InputMethod::Pointer,
            InputMethod::Auto if platform.touch_events => InputMethod::Touch,
            InputMethod::Auto => InputMethod::Mouse,
            method => method,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub method: InputMethod,
    /// Milliseconds a press must be held to fire `long_press`.
    pub hold_delay: f64,
    pub platform: PlatformSupport,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            method: InputMethod::Auto,
            hold_delay: DEFAULT_HOLD_DELAY,
            platform: PlatformSupport::default(),
        }
    }
}

impl GestureConfig {
    pub fn with_method(mut self, method: InputMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_hold_delay(mut self, hold_delay: f64) -> Self {
        self.hold_delay = hold_delay;
        self
    }

    pub fn with_platform(mut self, platform: PlatformSupport) -> Self {
        self.platform = platform;
        self
    }

    pub fn resolved_method(&self) -> InputMethod {
        self.method.resolve(self.platform)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    /// Window of samples, in ms, used to derive velocity.
    pub hysteresis: f64,
    /// Magnitude of the decelerating acceleration, in px/ms².
    pub acceleration: f64,
    /// Velocity clamp, in px/ms.
    pub velocity_max: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            hysteresis: DEFAULT_HYSTERESIS,
            acceleration: DEFAULT_ACCELERATION,
            velocity_max: DEFAULT_VELOCITY_MAX,
        }
    }
}

impl MomentumConfig {
    pub fn with_hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = acceleration.abs();
        self
    }

    pub fn with_velocity_max(mut self, velocity_max: f64) -> Self {
        self.velocity_max = velocity_max.abs();
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleConfig {
    /// Minimum range separation between the two inputs of a two-point solve.
    pub distance_min: f64,
    /// Drive both scales from one radial solve and re-anchor extra inputs.
    pub preserve_aspect_ratio: bool,
    /// Translate wheel events into zoom momentum.
    pub wheel: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            distance_min: DEFAULT_DISTANCE_MIN,
            preserve_aspect_ratio: false,
            wheel: true,
        }
    }
}

impl ScaleConfig {
    pub fn with_distance_min(mut self, distance_min: f64) -> Self {
        self.distance_min = distance_min;
        self
    }

    pub fn with_preserve_aspect_ratio(mut self, preserve_aspect_ratio: bool) -> Self {
        self.preserve_aspect_ratio = preserve_aspect_ratio;
        self
    }

    pub fn with_wheel(mut self, wheel: bool) -> Self {
        self.wheel = wheel;
        self
    }
}
