//! Device backends.
//!
//! A backend knows which native listeners a gesture needs and how to turn
//! one native event into updates of input records. The gesture owns the
//! listener bookkeeping and the state machines; backends are stateless.

use smallvec::{smallvec, SmallVec};
use tactile_geometry::Point;

use crate::config::InputMethod;
use crate::constants::MOUSE_ID;
use crate::event::{
    EventType, InputType, MouseEvent, MouseEventKind, NativeEvent, PointerEvent,
    PointerEventKind, TouchEvent, TouchEventKind, WheelEvent,
};
use crate::input::{InputDetail, InputId};

/// Id carried by zoom updates. Zoom updates do not address a record.
pub const WHEEL_ID: &str = "wheel";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    BeginHover,
    EndHover,
    BeginPress,
    MovePress,
    EndPress,
    CancelPress,
    /// Wheel movement; negative `dz` (scrolling up) zooms in.
    Zoom { dz: f64 },
}

/// One translated change to a single input record.
#[derive(Clone, Debug, PartialEq)]
pub struct InputUpdate {
    pub action: InputAction,
    pub id: InputId,
    pub input_type: InputType,
    pub is_primary: bool,
    pub client: Point,
    pub time: f64,
    pub detail: InputDetail,
}

pub trait InputBackend {
    fn method(&self) -> InputMethod;

    /// Listeners attached while the gesture is mounted.
    fn hover_events(&self) -> &'static [EventType];

    /// Listeners attached while at least one press is active.
    fn press_events(&self) -> &'static [EventType];

    /// Translates a native event. Events of another device family yield no
    /// updates.
    fn translate(&self, event: &NativeEvent) -> SmallVec<[InputUpdate; 2]>;
}

/// Creates the backend for an already resolved input method. `Auto` falls
/// back to mouse.
pub fn backend_for(method: InputMethod) -> Box<dyn InputBackend> {
    match method {
        InputMethod::Pointer => Box::new(PointerBackend),
        InputMethod::Touch => Box::new(TouchBackend),
        InputMethod::Mouse | InputMethod::Auto => Box::new(MouseBackend),
    }
}

fn zoom_update(event: &WheelEvent) -> InputUpdate {
    InputUpdate {
        action: InputAction::Zoom { dz: event.delta_y },
        id: InputId::new(WHEEL_ID),
        input_type: InputType::Mouse,
        is_primary: true,
        client: event.client,
        time: event.time_stamp,
        detail: InputDetail {
            screen: event.client,
            modifiers: event.modifiers,
            ..InputDetail::default()
        },
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MouseBackend;

impl MouseBackend {
    fn update(event: &MouseEvent, action: InputAction) -> InputUpdate {
        InputUpdate {
            action,
            id: InputId::new(MOUSE_ID),
            input_type: InputType::Mouse,
            is_primary: true,
            client: event.client,
            time: event.time_stamp,
            detail: InputDetail {
                screen: event.screen,
                button: event.button,
                buttons: event.buttons,
                modifiers: event.modifiers,
                width: 1.0,
                height: 1.0,
                ..InputDetail::default()
            },
        }
    }
}

impl InputBackend for MouseBackend {
    fn method(&self) -> InputMethod {
        InputMethod::Mouse
    }

    fn hover_events(&self) -> &'static [EventType] {
        &[
            EventType::MouseEnter,
            EventType::MouseLeave,
            EventType::MouseDown,
        ]
    }

    fn press_events(&self) -> &'static [EventType] {
        &[EventType::MouseMove, EventType::MouseUp]
    }

    fn translate(&self, event: &NativeEvent) -> SmallVec<[InputUpdate; 2]> {
        match event {
            NativeEvent::Mouse(event) => {
                let action = match event.kind {
                    MouseEventKind::Enter => InputAction::BeginHover,
                    MouseEventKind::Leave => InputAction::EndHover,
                    MouseEventKind::Down => InputAction::BeginPress,
                    MouseEventKind::Move => InputAction::MovePress,
                    MouseEventKind::Up => InputAction::EndPress,
                };
                smallvec![Self::update(event, action)]
            }
            NativeEvent::Wheel(event) => smallvec![zoom_update(event)],
            _ => SmallVec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TouchBackend;

impl TouchBackend {
    pub fn input_id(identifier: i64) -> InputId {
        InputId::from(format!("touch{identifier}"))
    }
}

impl InputBackend for TouchBackend {
    fn method(&self) -> InputMethod {
        InputMethod::Touch
    }

    fn hover_events(&self) -> &'static [EventType] {
        &[EventType::TouchStart]
    }

    fn press_events(&self) -> &'static [EventType] {
        &[
            EventType::TouchMove,
            EventType::TouchEnd,
            EventType::TouchCancel,
        ]
    }

    fn translate(&self, event: &NativeEvent) -> SmallVec<[InputUpdate; 2]> {
        match event {
            NativeEvent::Touch(event) => translate_touches(event),
            NativeEvent::Wheel(event) => smallvec![zoom_update(event)],
            _ => SmallVec::new(),
        }
    }
}

fn translate_touches(event: &TouchEvent) -> SmallVec<[InputUpdate; 2]> {
    let action = match event.kind {
        TouchEventKind::Start => InputAction::BeginPress,
        TouchEventKind::Move => InputAction::MovePress,
        TouchEventKind::End => InputAction::EndPress,
        TouchEventKind::Cancel => InputAction::CancelPress,
    };
    event
        .changed_touches
        .iter()
        .enumerate()
        .map(|(index, touch)| InputUpdate {
            action,
            id: TouchBackend::input_id(touch.identifier),
            input_type: InputType::Touch,
            is_primary: index == 0,
            client: touch.client,
            time: event.time_stamp,
            detail: InputDetail {
                screen: touch.screen,
                modifiers: event.modifiers,
                width: touch.radius.width * 2.0,
                height: touch.radius.height * 2.0,
                pressure: touch.force,
                twist: touch.rotation_angle,
                ..InputDetail::default()
            },
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerBackend;

impl PointerBackend {
    pub fn input_id(pointer_id: i64) -> InputId {
        InputId::from(format!("pointer{pointer_id}"))
    }

    fn update(event: &PointerEvent, action: InputAction) -> InputUpdate {
        InputUpdate {
            action,
            id: Self::input_id(event.pointer_id),
            input_type: event.pointer_type,
            is_primary: event.is_primary,
            client: event.client,
            time: event.time_stamp,
            detail: InputDetail {
                screen: event.screen,
                button: event.button,
                buttons: event.buttons,
                modifiers: event.modifiers,
                width: event.width,
                height: event.height,
                pressure: event.pressure,
                tangential_pressure: event.tangential_pressure,
                tilt_x: event.tilt_x,
                tilt_y: event.tilt_y,
                twist: event.twist,
            },
        }
    }
}

impl InputBackend for PointerBackend {
    fn method(&self) -> InputMethod {
        InputMethod::Pointer
    }

    fn hover_events(&self) -> &'static [EventType] {
        &[
            EventType::PointerEnter,
            EventType::PointerLeave,
            EventType::PointerDown,
        ]
    }

    fn press_events(&self) -> &'static [EventType] {
        &[
            EventType::PointerMove,
            EventType::PointerUp,
            EventType::PointerCancel,
        ]
    }

    fn translate(&self, event: &NativeEvent) -> SmallVec<[InputUpdate; 2]> {
        match event {
            NativeEvent::Pointer(event) => {
                let hovers = event.pointer_type == InputType::Mouse;
                let action = match event.kind {
                    // Only mice hover; pens and fingers exist while pressed.
                    PointerEventKind::Enter if hovers => InputAction::BeginHover,
                    PointerEventKind::Leave if hovers => InputAction::EndHover,
                    PointerEventKind::Enter | PointerEventKind::Leave => {
                        return SmallVec::new()
                    }
                    PointerEventKind::Down => InputAction::BeginPress,
                    PointerEventKind::Move => InputAction::MovePress,
                    PointerEventKind::Up => InputAction::EndPress,
                    PointerEventKind::Cancel => InputAction::CancelPress,
                };
                smallvec![Self::update(event, action)]
            }
            NativeEvent::Wheel(event) => smallvec![zoom_update(event)],
            _ => SmallVec::new(),
        }
    }
}
