//! Native input events delivered by the host view.
//!
//! These mirror the browser's mouse, touch, pointer and wheel events closely
//! enough for the device backends to translate them into input record
//! updates. Fields the recognizers do not interpret are carried through to
//! [`InputDetail`](crate::InputDetail) untouched.

use smallvec::SmallVec;
use tactile_geometry::{Point, Size};

pub type PointerId = i64;

/// Listener types a gesture attaches to its view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    MouseEnter,
    MouseLeave,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Wheel,
}

/// Kind of device behind an input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    Mouse,
    Touch,
    Pen,
    #[default]
    Unknown,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Enter,
    Leave,
    Down,
    Move,
    Up,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub client: Point,
    pub screen: Point,
    pub button: Option<PointerButton>,
    pub buttons: PointerButtons,
    pub modifiers: Modifiers,
    pub time_stamp: f64,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, client: Point, time_stamp: f64) -> Self {
        Self {
            kind,
            client,
            screen: client,
            button: None,
            buttons: PointerButtons::NONE,
            modifiers: Modifiers::default(),
            time_stamp,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self.buttons.insert(button);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One contact point of a touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub identifier: i64,
    pub client: Point,
    pub screen: Point,
    pub radius: Size,
    pub rotation_angle: f64,
    pub force: f64,
}

impl Touch {
    pub fn new(identifier: i64, client: Point) -> Self {
        Self {
            identifier,
            client,
            screen: client,
            radius: Size::ZERO,
            rotation_angle: 0.0,
            force: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    /// Touches whose state changed with this event.
    pub changed_touches: SmallVec<[Touch; 4]>,
    pub modifiers: Modifiers,
    pub time_stamp: f64,
}

impl TouchEvent {
    pub fn new(kind: TouchEventKind, touches: &[Touch], time_stamp: f64) -> Self {
        Self {
            kind,
            changed_touches: touches.iter().copied().collect(),
            modifiers: Modifiers::default(),
            time_stamp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Enter,
    Leave,
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer_id: PointerId,
    pub pointer_type: InputType,
    pub is_primary: bool,
    pub client: Point,
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
    pub time_stamp: f64,
}

impl PointerEvent {
    pub fn new(
        kind: PointerEventKind,
        pointer_id: PointerId,
        pointer_type: InputType,
        client: Point,
        time_stamp: f64,
    ) -> Self {
        Self {
            kind,
            pointer_id,
            pointer_type,
            is_primary: true,
            client,
            screen: client,
            button: None,
            buttons: PointerButtons::NONE,
            modifiers: Modifiers::default(),
            width: 1.0,
            height: 1.0,
            pressure: 0.0,
            tangential_pressure: 0.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            twist: 0.0,
            time_stamp,
        }
    }

    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self.buttons.insert(button);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelEvent {
    pub client: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub delta_mode: DeltaMode,
    pub modifiers: Modifiers,
    pub time_stamp: f64,
}

impl WheelEvent {
    pub fn new(client: Point, delta_y: f64, time_stamp: f64) -> Self {
        Self {
            client,
            delta_x: 0.0,
            delta_y,
            delta_z: 0.0,
            delta_mode: DeltaMode::Pixel,
            modifiers: Modifiers::default(),
            time_stamp,
        }
    }
}

/// Any event a gesture can receive from its view.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEvent {
    Mouse(MouseEvent),
    Touch(TouchEvent),
    Pointer(PointerEvent),
    Wheel(WheelEvent),
}

impl NativeEvent {
    pub fn time_stamp(&self) -> f64 {
        match self {
            NativeEvent::Mouse(event) => event.time_stamp,
            NativeEvent::Touch(event) => event.time_stamp,
            NativeEvent::Pointer(event) => event.time_stamp,
            NativeEvent::Wheel(event) => event.time_stamp,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            NativeEvent::Mouse(event) => match event.kind {
                MouseEventKind::Enter => EventType::MouseEnter,
                MouseEventKind::Leave => EventType::MouseLeave,
                MouseEventKind::Down => EventType::MouseDown,
                MouseEventKind::Move => EventType::MouseMove,
                MouseEventKind::Up => EventType::MouseUp,
            },
            NativeEvent::Touch(event) => match event.kind {
                TouchEventKind::Start => EventType::TouchStart,
                TouchEventKind::Move => EventType::TouchMove,
                TouchEventKind::End => EventType::TouchEnd,
                TouchEventKind::Cancel => EventType::TouchCancel,
            },
            NativeEvent::Pointer(event) => match event.kind {
                PointerEventKind::Enter => EventType::PointerEnter,
                PointerEventKind::Leave => EventType::PointerLeave,
                PointerEventKind::Down => EventType::PointerDown,
                PointerEventKind::Move => EventType::PointerMove,
                PointerEventKind::Up => EventType::PointerUp,
                PointerEventKind::Cancel => EventType::PointerCancel,
            },
            NativeEvent::Wheel(_) => EventType::Wheel,
        }
    }
}

impl From<MouseEvent> for NativeEvent {
    fn from(event: MouseEvent) -> Self {
        NativeEvent::Mouse(event)
    }
}

impl From<TouchEvent> for NativeEvent {
    fn from(event: TouchEvent) -> Self {
        NativeEvent::Touch(event)
    }
}

impl From<PointerEvent> for NativeEvent {
    fn from(event: PointerEvent) -> Self {
        NativeEvent::Pointer(event)
    }
}

impl From<WheelEvent> for NativeEvent {
    fn from(event: WheelEvent) -> Self {
        NativeEvent::Wheel(event)
    }
}
