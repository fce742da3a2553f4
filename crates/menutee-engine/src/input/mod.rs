//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts translate window-system and
//! controller events into `InputEvent`s; menus only ever see the
//! [`MenuInputMediator`] questions.

mod frame;
mod mediator;
mod state;
mod types;

pub use frame::InputFrame;
pub use mediator::{BindingsMediator, InputBindings, InputSnapshot, MenuInputMediator, ScriptedInput};
pub use state::InputState;
pub use types::{
    Axis,
    GamepadButton,
    InputDeviceKind,
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
