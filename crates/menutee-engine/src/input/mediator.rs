use std::collections::VecDeque;

use super::frame::InputFrame;
use super::state::InputState;
use super::types::{GamepadButton, InputDeviceKind, InputEvent, Key};

/// The input questions a menu asks once per frame.
///
/// Axes are in [-1, 1] with `y` positive up. The `*_pressed` queries are edge
/// triggered: true only on the frame the button went down.
pub trait MenuInputMediator {
    fn ui_axis_x(&self) -> f32;
    fn ui_axis_y(&self) -> f32;

    fn ui_submit_pressed(&self) -> bool;
    fn ui_cancel_pressed(&self) -> bool;
    fn menu_toggle_pressed(&self) -> bool;

    fn last_input_device(&self) -> InputDeviceKind;
}

// ── InputBindings ─────────────────────────────────────────────────────────

/// Which keys and controller buttons drive each menu input.
#[derive(Debug, Clone)]
pub struct InputBindings {
    pub submit_keys: Vec<Key>,
    pub cancel_keys: Vec<Key>,
    pub toggle_keys: Vec<Key>,
    pub left_keys: Vec<Key>,
    pub right_keys: Vec<Key>,
    pub up_keys: Vec<Key>,
    pub down_keys: Vec<Key>,

    pub submit_buttons: Vec<GamepadButton>,
    pub cancel_buttons: Vec<GamepadButton>,
    pub toggle_buttons: Vec<GamepadButton>,

    /// Stick deflection at or below this reads as zero.
    pub stick_dead_zone: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            submit_keys: vec![Key::Enter, Key::Space],
            cancel_keys: vec![Key::Backspace],
            toggle_keys: vec![Key::Escape],
            left_keys: vec![Key::ArrowLeft, Key::A],
            right_keys: vec![Key::ArrowRight, Key::D],
            up_keys: vec![Key::ArrowUp, Key::W],
            down_keys: vec![Key::ArrowDown, Key::S],

            submit_buttons: vec![GamepadButton::South],
            cancel_buttons: vec![GamepadButton::East],
            toggle_buttons: vec![GamepadButton::Start],

            stick_dead_zone: 0.25,
        }
    }
}

// ── BindingsMediator ──────────────────────────────────────────────────────

/// [`MenuInputMediator`] fed by platform-agnostic [`InputEvent`]s.
///
/// Per frame the host calls [`begin_frame`](Self::begin_frame), then
/// [`apply_event`](Self::apply_event) for every event it received, then lets
/// the menus poll.
#[derive(Debug, Default)]
pub struct BindingsMediator {
    pub bindings: InputBindings,
    state: InputState,
    frame: InputFrame,
}

impl BindingsMediator {
    pub fn new(bindings: InputBindings) -> Self {
        Self { bindings, state: InputState::default(), frame: InputFrame::default() }
    }

    /// Clears last frame's transitions. Held state carries over.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn apply_event(&mut self, ev: InputEvent) {
        self.state.apply_event(&mut self.frame, ev);
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.state.key_down(*k))
    }

    fn pressed(&self, keys: &[Key], buttons: &[GamepadButton]) -> bool {
        keys.iter().any(|k| self.frame.keys_pressed.contains(k))
            || buttons.iter().any(|b| self.frame.gamepad_pressed.contains(b))
    }

    /// Digital axis from keys and d-pad; falls back to the stick when both are idle.
    fn axis(&self, neg: (&[Key], GamepadButton), pos: (&[Key], GamepadButton), stick: f32) -> f32 {
        let neg_held = self.any_held(neg.0) || self.state.gamepad_down(neg.1);
        let pos_held = self.any_held(pos.0) || self.state.gamepad_down(pos.1);
        let digital = (pos_held as i8 - neg_held as i8) as f32;
        if digital != 0.0 {
            digital
        } else if stick.abs() > self.bindings.stick_dead_zone {
            stick
        } else {
            0.0
        }
    }
}

impl MenuInputMediator for BindingsMediator {
    fn ui_axis_x(&self) -> f32 {
        let b = &self.bindings;
        self.axis(
            (b.left_keys.as_slice(), GamepadButton::DPadLeft),
            (b.right_keys.as_slice(), GamepadButton::DPadRight),
            self.state.stick.0,
        )
    }

    fn ui_axis_y(&self) -> f32 {
        let b = &self.bindings;
        self.axis(
            (b.down_keys.as_slice(), GamepadButton::DPadDown),
            (b.up_keys.as_slice(), GamepadButton::DPadUp),
            self.state.stick.1,
        )
    }

    fn ui_submit_pressed(&self) -> bool {
        self.pressed(&self.bindings.submit_keys, &self.bindings.submit_buttons)
    }

    fn ui_cancel_pressed(&self) -> bool {
        self.pressed(&self.bindings.cancel_keys, &self.bindings.cancel_buttons)
    }

    fn menu_toggle_pressed(&self) -> bool {
        self.pressed(&self.bindings.toggle_keys, &self.bindings.toggle_buttons)
    }

    fn last_input_device(&self) -> InputDeviceKind {
        self.state.last_device
    }
}

// ── ScriptedInput ─────────────────────────────────────────────────────────

/// One frame of already-resolved menu input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub axis_x: f32,
    pub axis_y: f32,
    pub submit: bool,
    pub cancel: bool,
    pub toggle: bool,
    pub device: InputDeviceKind,
}

impl InputSnapshot {
    pub fn idle() -> Self { Self::default() }
    pub fn submit() -> Self { Self { submit: true, device: InputDeviceKind::Keyboard, ..Self::default() } }
    pub fn cancel() -> Self { Self { cancel: true, device: InputDeviceKind::Keyboard, ..Self::default() } }
    pub fn toggle() -> Self { Self { toggle: true, device: InputDeviceKind::Keyboard, ..Self::default() } }
    pub fn axis(x: f32, y: f32) -> Self {
        Self { axis_x: x, axis_y: y, device: InputDeviceKind::Controller, ..Self::default() }
    }
    pub fn with_device(mut self, device: InputDeviceKind) -> Self { self.device = device; self }
}

/// [`MenuInputMediator`] replaying a queue of snapshots, one per frame.
///
/// The device kind is sticky: an idle snapshot with `Unknown` device keeps
/// reporting the last known device, the way real input does.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputSnapshot>,
    current: InputSnapshot,
    device: InputDeviceKind,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: InputSnapshot) {
        self.queue.push_back(snapshot);
    }

    pub fn extend(&mut self, snapshots: impl IntoIterator<Item = InputSnapshot>) {
        self.queue.extend(snapshots);
    }

    /// Replaces the current frame directly, bypassing the queue.
    pub fn set(&mut self, snapshot: InputSnapshot) {
        self.apply(snapshot);
    }

    /// Moves to the next queued snapshot (idle when the queue is empty).
    pub fn advance(&mut self) {
        let next = self.queue.pop_front().unwrap_or_default();
        self.apply(next);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    fn apply(&mut self, snapshot: InputSnapshot) {
        if snapshot.device != InputDeviceKind::Unknown {
            self.device = snapshot.device;
        }
        self.current = snapshot;
    }
}

impl MenuInputMediator for ScriptedInput {
    fn ui_axis_x(&self) -> f32 { self.current.axis_x }
    fn ui_axis_y(&self) -> f32 { self.current.axis_y }
    fn ui_submit_pressed(&self) -> bool { self.current.submit }
    fn ui_cancel_pressed(&self) -> bool { self.current.cancel }
    fn menu_toggle_pressed(&self) -> bool { self.current.toggle }
    fn last_input_device(&self) -> InputDeviceKind { self.device }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Axis, KeyState, Modifiers};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    #[test]
    fn submit_is_edge_triggered() {
        let mut m = BindingsMediator::default();
        m.begin_frame();
        m.apply_event(key(Key::Enter, KeyState::Pressed));
        assert!(m.ui_submit_pressed());

        m.begin_frame();
        assert!(!m.ui_submit_pressed(), "held key does not re-trigger");
    }

    #[test]
    fn held_arrows_drive_axes() {
        let mut m = BindingsMediator::default();
        m.begin_frame();
        m.apply_event(key(Key::ArrowLeft, KeyState::Pressed));
        m.apply_event(key(Key::ArrowUp, KeyState::Pressed));
        assert_eq!(m.ui_axis_x(), -1.0);
        assert_eq!(m.ui_axis_y(), 1.0);

        m.begin_frame();
        m.apply_event(key(Key::ArrowRight, KeyState::Pressed));
        assert_eq!(m.ui_axis_x(), 0.0, "opposing keys cancel");
    }

    #[test]
    fn stick_respects_dead_zone() {
        let mut m = BindingsMediator::default();
        m.begin_frame();
        m.apply_event(InputEvent::GamepadAxis { axis: Axis::Y, value: -0.2 });
        assert_eq!(m.ui_axis_y(), 0.0);
        m.apply_event(InputEvent::GamepadAxis { axis: Axis::Y, value: -0.8 });
        assert_eq!(m.ui_axis_y(), -0.8);
        assert_eq!(m.last_input_device(), InputDeviceKind::Controller);
    }

    #[test]
    fn controller_buttons_map_to_menu_actions() {
        let mut m = BindingsMediator::default();
        m.begin_frame();
        m.apply_event(InputEvent::GamepadButton { button: GamepadButton::East, state: KeyState::Pressed });
        m.apply_event(InputEvent::GamepadButton { button: GamepadButton::Start, state: KeyState::Pressed });
        assert!(m.ui_cancel_pressed());
        assert!(m.menu_toggle_pressed());
        assert!(!m.ui_submit_pressed());
    }

    #[test]
    fn scripted_input_replays_and_keeps_device() {
        let mut s = ScriptedInput::new();
        s.push(InputSnapshot::submit());
        s.push(InputSnapshot::idle());

        s.advance();
        assert!(s.ui_submit_pressed());
        assert_eq!(s.last_input_device(), InputDeviceKind::Keyboard);

        s.advance();
        assert!(!s.ui_submit_pressed());
        assert_eq!(s.last_input_device(), InputDeviceKind::Keyboard);
        assert_eq!(s.remaining(), 0);
    }
}
