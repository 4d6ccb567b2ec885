//! The gesture core: input bookkeeping, view binding and event dispatch.
//!
//! A [`Gesture`] is parameterised by its view type and a [`GestureMode`].
//! The mode decides which layer of behaviour is active: plain hover/press
//! tracking, inertial coasting, or coasting that drives a pair of scales.
//! The state machines themselves live in `position.rs` and `momentum.rs`;
//! this module owns the records, counters and listeners they operate on.

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use rustc_hash::FxBuildHasher;

use crate::backend::{backend_for, InputAction, InputBackend, InputUpdate};
use crate::config::{GestureConfig, MomentumConfig};
use crate::error::GestureError;
use crate::event::{EventType, InputType, NativeEvent};
use crate::input::{GestureInput, InputId};
use crate::observer::{GestureObserver, NoopObserver};
use crate::view::GestureView;

/// Which press transition a mode hook is reacting to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressPhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// Layer-specific behaviour plugged into a [`Gesture`].
///
/// Hooks are associated functions over the whole gesture so that a mode can
/// reach both its own state (`gesture.mode`) and the shared records.
#[allow(unused_variables)]
pub trait GestureMode<V: ?Sized>: Sized {
    /// Domain type of the X scale, `()` for gestures without scales.
    type X;
    /// Domain type of the Y scale, `()` for gestures without scales.
    type Y;

    /// Momentum parameters, or `None` when the gesture does not coast.
    fn momentum(&self) -> Option<&MomentumConfig> {
        None
    }

    /// Whether the gesture listens to wheel events.
    fn wheel_enabled(&self) -> bool {
        false
    }

    /// Drops transient state when the gesture is unmounted.
    fn reset(&mut self) {}

    fn on_press_update(gesture: &mut Gesture<V, Self>, id: &str, phase: PressPhase) {}

    fn on_begin_coast(gesture: &mut Gesture<V, Self>, id: &str) {}

    fn on_end_coast(gesture: &mut Gesture<V, Self>, id: &str) {}

    /// Runs after every coast tick, before stopped inputs are ended.
    fn on_coast(gesture: &mut Gesture<V, Self>) {}

    /// Advances every coasting input to `t`.
    fn integrate(gesture: &mut Gesture<V, Self>, t: f64) {
        gesture.integrate_inputs(t);
    }

    /// Per-frame work after coasting has been integrated.
    fn animate(gesture: &mut Gesture<V, Self>, t: f64) {}

    fn zoom(
        gesture: &mut Gesture<V, Self>,
        x: f64,
        y: f64,
        dz: f64,
        event: Option<&NativeEvent>,
    ) {
    }
}

/// Hover and press tracking only.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionMode;

impl<V: ?Sized> GestureMode<V> for PositionMode {
    type X = ();
    type Y = ();
}

/// Hover and press tracking with inertial coasting after release.
#[derive(Clone, Copy, Debug, Default)]
pub struct MomentumMode {
    pub(crate) config: MomentumConfig,
}

impl<V: ?Sized> GestureMode<V> for MomentumMode {
    type X = ();
    type Y = ();

    fn momentum(&self) -> Option<&MomentumConfig> {
        Some(&self.config)
    }
}

pub type PositionGesture<V = dyn GestureView> = Gesture<V, PositionMode>;
pub type MomentumGesture<V = dyn GestureView> = Gesture<V, MomentumMode>;

type InputMap<X, Y> = IndexMap<InputId, GestureInput<X, Y>, FxBuildHasher>;

pub struct Gesture<V: ?Sized, M: GestureMode<V>> {
    pub(crate) name: String,
    pub(crate) view: Option<Rc<V>>,
    pub(crate) inputs: InputMap<M::X, M::Y>,
    pub(crate) hover_count: usize,
    pub(crate) press_count: usize,
    pub(crate) coast_count: usize,
    pub(crate) interacting: bool,
    pub(crate) press_listening: bool,
    pub(crate) hold_delay: f64,
    pub(crate) backend: Box<dyn InputBackend>,
    pub(crate) observer: Box<dyn GestureObserver<M::X, M::Y>>,
    pub(crate) mode: M,
}

impl<V: ?Sized> Gesture<V, PositionMode>
where
    V: GestureView,
{
    pub fn new(name: impl Into<String>, config: GestureConfig) -> Self {
        Self::with_mode(name, config, PositionMode)
    }
}

impl<V: ?Sized> Gesture<V, MomentumMode>
where
    V: GestureView,
{
    pub fn new(name: impl Into<String>, config: GestureConfig, momentum: MomentumConfig) -> Self {
        Self::with_mode(name, config, MomentumMode { config: momentum })
    }

    pub fn momentum_config(&self) -> &MomentumConfig {
        &self.mode.config
    }
}

impl<V, M> Gesture<V, M>
where
    V: GestureView + ?Sized,
    M: GestureMode<V>,
{
    pub fn with_mode(name: impl Into<String>, config: GestureConfig, mode: M) -> Self {
        Self {
            name: name.into(),
            view: None,
            inputs: IndexMap::with_hasher(FxBuildHasher),
            hover_count: 0,
            press_count: 0,
            coast_count: 0,
            interacting: false,
            press_listening: false,
            hold_delay: config.hold_delay,
            backend: backend_for(config.resolved_method()),
            observer: Box::new(NoopObserver),
            mode,
        }
    }

    pub fn with_observer(mut self, observer: impl GestureObserver<M::X, M::Y> + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl GestureObserver<M::X, M::Y> + 'static) {
        self.observer = Box::new(observer);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &dyn InputBackend {
        self.backend.as_ref()
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    pub fn view(&self) -> Result<&Rc<V>, GestureError> {
        self.view.as_ref().ok_or(GestureError::Unbound)
    }

    /// Rebinds the gesture. The old view (if any) is unmounted first, which
    /// drops every input without firing end callbacks.
    pub fn set_view(&mut self, view: Option<Rc<V>>) {
        if let (Some(old), Some(new)) = (&self.view, &view) {
            if Rc::ptr_eq(old, new) {
                warn!("{}: remounting on the same view drops {} inputs", self.name, self.inputs.len());
            }
        }
        self.unmount();
        self.view = view;
        self.mount();
    }

    fn mount(&mut self) {
        let Some(view) = self.view.clone() else {
            return;
        };
        for &event_type in self.backend.hover_events() {
            view.add_event_listener(event_type);
        }
        if self.mode.wheel_enabled() {
            view.add_event_listener(EventType::Wheel);
        }
        debug!("{}: mounted with {:?} backend", self.name, self.backend.method());
    }

    fn unmount(&mut self) {
        let Some(view) = self.view.clone() else {
            return;
        };
        for &event_type in self.backend.hover_events() {
            view.remove_event_listener(event_type);
        }
        if self.mode.wheel_enabled() {
            view.remove_event_listener(EventType::Wheel);
        }
        if self.press_listening {
            for &event_type in self.backend.press_events() {
                view.remove_event_listener(event_type);
            }
            self.press_listening = false;
        }
        for input in self.inputs.values_mut() {
            if let Some(timer) = input.hold_timer.take() {
                view.clear_timeout(timer);
            }
        }
        debug!(
            "{}: unmounted, dropping {} inputs",
            self.name,
            self.inputs.len()
        );
        self.inputs.clear();
        self.hover_count = 0;
        self.press_count = 0;
        self.coast_count = 0;
        self.interacting = false;
        self.mode.reset();
    }

    pub fn input(&self, id: &str) -> Result<&GestureInput<M::X, M::Y>, GestureError> {
        self.inputs
            .get(id)
            .ok_or_else(|| GestureError::UnknownInput(InputId::new(id)))
    }

    pub fn get_input(&self, id: &str) -> Option<&GestureInput<M::X, M::Y>> {
        self.inputs.get(id)
    }

    pub fn get_input_mut(&mut self, id: &str) -> Option<&mut GestureInput<M::X, M::Y>> {
        self.inputs.get_mut(id)
    }

    /// Inputs in creation order.
    pub fn inputs(&self) -> impl Iterator<Item = &GestureInput<M::X, M::Y>> {
        self.inputs.values()
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn hover_count(&self) -> usize {
        self.hover_count
    }

    pub fn press_count(&self) -> usize {
        self.press_count
    }

    pub fn coast_count(&self) -> usize {
        self.coast_count
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn get_or_create_input(
        &mut self,
        id: impl Into<InputId>,
        input_type: InputType,
        is_primary: bool,
        x: f64,
        y: f64,
        t: f64,
    ) -> &mut GestureInput<M::X, M::Y> {
        let id = id.into();
        self.inputs
            .entry(id)
            .or_insert_with_key(|id| GestureInput::new(id.clone(), input_type, is_primary, x, y, t))
    }

    /// Drops a record regardless of its state. Counters are kept in step and
    /// no callbacks fire.
    pub fn clear_input(&mut self, id: &str) {
        let Some(mut input) = self.inputs.shift_remove(id) else {
            return;
        };
        if let Some(timer) = input.hold_timer.take() {
            if let Some(view) = self.view.as_deref() {
                view.clear_timeout(timer);
            }
        }
        self.hover_count -= usize::from(input.hovering);
        self.press_count -= usize::from(input.pressing);
        self.coast_count -= usize::from(input.coasting);
        if self.press_count == 0 {
            self.detach_press_listeners();
        }
        if self.press_count == 0 && self.coast_count == 0 {
            self.interacting = false;
        }
        trace!("{}: cleared {}", self.name, input.id());
    }

    pub fn clear_inputs(&mut self) {
        let ids: Vec<InputId> = self.inputs.keys().cloned().collect();
        for id in ids {
            self.clear_input(&id);
        }
    }

    /// Checks that every counter matches the flags of the tracked records.
    pub fn verify(&self) -> Result<(), GestureError> {
        let check = |counter: &'static str, counted: usize, flagged: usize| {
            if counted == flagged {
                Ok(())
            } else {
                Err(GestureError::CountMismatch {
                    counter,
                    counted,
                    flagged,
                })
            }
        };
        let flagged = |flag: fn(&GestureInput<M::X, M::Y>) -> bool| {
            self.inputs.values().filter(|input| flag(input)).count()
        };
        check("hover_count", self.hover_count, flagged(|i| i.hovering))?;
        check("press_count", self.press_count, flagged(|i| i.pressing))?;
        check("coast_count", self.coast_count, flagged(|i| i.coasting))?;
        Ok(())
    }

    pub(crate) fn debug_verify(&self) {
        debug_assert_eq!(self.verify(), Ok(()), "{}: counters out of step", self.name);
        debug_assert!(
            self.inputs.values().all(|input| !input.is_inert()),
            "{}: inert input left behind",
            self.name
        );
    }

    /// Feeds one native event from the view into the gesture.
    pub fn handle_event(&mut self, event: &NativeEvent) {
        let updates = self.backend.translate(event);
        for update in updates {
            self.apply_update(update, event);
        }
        self.debug_verify();
    }

    fn apply_update(&mut self, update: InputUpdate, event: &NativeEvent) {
        let InputUpdate {
            action,
            id,
            input_type,
            is_primary,
            client,
            time,
            detail,
        } = update;
        trace!("{}: {:?} {} at {:?}", self.name, action, id, client);

        let event = Some(event);
        if let InputAction::Zoom { dz } = action {
            M::zoom(self, client.x, client.y, dz, event);
            return;
        }

        let creates = matches!(action, InputAction::BeginHover | InputAction::BeginPress);
        let input = if creates {
            Some(self.get_or_create_input(id.clone(), input_type, is_primary, client.x, client.y, time))
        } else {
            self.inputs.get_mut(&id)
        };
        let Some(input) = input else {
            trace!("{}: ignoring {:?} for unknown input {}", self.name, action, id);
            return;
        };
        // A coasting input owns its position until it is pressed again.
        if !input.coasting || input.pressing || action == InputAction::BeginPress {
            input.update(client.x, client.y, time);
            input.detail = detail;
        }

        match action {
            InputAction::BeginHover => self.begin_hover(&id, event),
            InputAction::EndHover => self.end_hover(&id, event),
            InputAction::BeginPress => self.begin_press(&id, event),
            InputAction::MovePress => self.move_press(&id, event),
            InputAction::EndPress => self.end_press(&id, event),
            InputAction::CancelPress => self.cancel_press(&id, event),
            InputAction::Zoom { .. } => {}
        }
        self.clear_if_inert(&id);
    }

    /// Runs `hook` against the observer and the record for `id`.
    /// Missing records yield `R::default()`.
    pub(crate) fn notify<R: Default>(
        &mut self,
        id: &str,
        hook: impl FnOnce(&mut dyn GestureObserver<M::X, M::Y>, &GestureInput<M::X, M::Y>) -> R,
    ) -> R {
        match self.inputs.get(id) {
            Some(input) => hook(self.observer.as_mut(), input),
            None => R::default(),
        }
    }

    pub(crate) fn clear_if_inert(&mut self, id: &str) {
        if self.inputs.get(id).is_some_and(|input| input.is_inert()) {
            self.clear_input(id);
        }
    }

    pub(crate) fn ids_where(
        &self,
        filter: impl Fn(&GestureInput<M::X, M::Y>) -> bool,
    ) -> Vec<InputId> {
        self.inputs
            .values()
            .filter(|input| filter(input))
            .map(|input| input.id().clone())
            .collect()
    }

    pub(crate) fn require_animate(&self) {
        if let Some(view) = self.view.as_deref() {
            view.require_animate();
        }
    }

    pub(crate) fn attach_press_listeners(&mut self) {
        if self.press_listening {
            return;
        }
        if let Some(view) = self.view.as_deref() {
            for &event_type in self.backend.press_events() {
                view.add_event_listener(event_type);
            }
            self.press_listening = true;
        }
    }

    pub(crate) fn detach_press_listeners(&mut self) {
        if !self.press_listening {
            return;
        }
        if let Some(view) = self.view.as_deref() {
            for &event_type in self.backend.press_events() {
                view.remove_event_listener(event_type);
            }
        }
        self.press_listening = false;
    }
}

impl<V: ?Sized, M: GestureMode<V>> Gesture<V, M> {
    /// Plain per-input integration of every coasting input.
    pub fn integrate_inputs(&mut self, t: f64) {
        for input in self.inputs.values_mut().filter(|input| input.coasting) {
            input.integrate_velocity(t);
        }
    }
}
