use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    Axis,
    GamepadButton,
    InputDeviceKind,
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    Modifiers,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Stick deflection below this does not count as controller activity.
const STICK_ACTIVITY: f32 = 0.1;

/// Current input state for one host window.
///
/// Holds "is down" information, the stick position, the current pointer
/// position and which device kind spoke last. Per-frame transitions are
/// recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Set of currently held controller buttons.
    pub gamepad_down: HashSet<GamepadButton>,

    /// Left stick position, `y` positive up.
    pub stick: (f32, f32),

    /// Device kind of the most recent meaningful input.
    pub last_device: InputDeviceKind,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets.
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.gamepad_down.clear();
                    self.stick = (0.0, 0.0);
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                self.last_device = InputDeviceKind::Pointer;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;
                self.last_device = InputDeviceKind::Keyboard;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                self.last_device = InputDeviceKind::Pointer;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
                self.last_device = InputDeviceKind::Pointer;
            }

            InputEvent::GamepadButton { button, state } => {
                self.last_device = InputDeviceKind::Controller;
                match state {
                    KeyState::Pressed => {
                        if self.gamepad_down.insert(*button) {
                            frame.gamepad_pressed.insert(*button);
                        }
                    }
                    KeyState::Released => {
                        self.gamepad_down.remove(button);
                    }
                }
            }

            InputEvent::GamepadAxis { axis, value } => {
                let value = value.clamp(-1.0, 1.0);
                match axis {
                    Axis::X => self.stick.0 = value,
                    Axis::Y => self.stick.1 = value,
                }
                // Resting sticks drift; only deliberate deflection changes the device.
                if value.abs() > STICK_ACTIVITY {
                    self.last_device = InputDeviceKind::Controller;
                }
            }

        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn gamepad_down(&self, btn: GamepadButton) -> bool {
        self.gamepad_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    #[test]
    fn key_press_is_recorded_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Enter, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::Enter));

        frame.clear();
        state.apply_event(&mut frame, key(Key::Enter, KeyState::Pressed));
        assert!(frame.keys_pressed.is_empty(), "repeat press while held is not a new press");
        assert!(state.key_down(Key::Enter));
    }

    #[test]
    fn last_device_follows_most_recent_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert_eq!(state.last_device, InputDeviceKind::Unknown);

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        assert_eq!(state.last_device, InputDeviceKind::Pointer);

        state.apply_event(&mut frame, key(Key::ArrowDown, KeyState::Pressed));
        assert_eq!(state.last_device, InputDeviceKind::Keyboard);

        state.apply_event(
            &mut frame,
            InputEvent::GamepadButton { button: GamepadButton::South, state: KeyState::Pressed },
        );
        assert_eq!(state.last_device, InputDeviceKind::Controller);
    }

    #[test]
    fn stick_noise_does_not_claim_the_device() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::GamepadAxis { axis: Axis::X, value: 0.05 });
        assert_eq!(state.last_device, InputDeviceKind::Keyboard);
        assert_eq!(state.stick, (0.05, 0.0));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::GamepadAxis { axis: Axis::Y, value: 1.0 });
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert_eq!(state.stick, (0.0, 0.0));
    }
}
