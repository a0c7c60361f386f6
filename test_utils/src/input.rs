//! Builders for controller input used in tests.

use bevy::input::ButtonInput;
use bevy::prelude::KeyCode;
use mece::controller::FrameInput;

/// No keys held, no interact press.
#[must_use]
pub fn idle() -> FrameInput {
    FrameInput::default()
}

/// Only the interact key pressed this frame.
///
/// # Examples
/// ```
/// let input = test_utils::input::interact();
/// assert!(input.interact_pressed);
/// assert_eq!(input.direction(), None);
/// ```
#[must_use]
pub fn interact() -> FrameInput {
    FrameInput {
        interact_pressed: true,
        ..FrameInput::default()
    }
}

/// Arrow keys held, given in any order.
#[must_use]
pub fn arrows(keys: &[KeyCode]) -> FrameInput {
    let mut input = FrameInput::default();
    for key in keys {
        match key {
            KeyCode::ArrowLeft => input.left = true,
            KeyCode::ArrowRight => input.right = true,
            KeyCode::ArrowUp => input.up = true,
            KeyCode::ArrowDown => input.down = true,
            _ => {}
        }
    }
    input
}

/// Presses `keys` on a fresh keyboard, so each registers as just pressed.
#[must_use]
pub fn keyboard_with(keys: &[KeyCode]) -> ButtonInput<KeyCode> {
    let mut keyboard = ButtonInput::default();
    for key in keys {
        keyboard.press(*key);
    }
    keyboard
}
