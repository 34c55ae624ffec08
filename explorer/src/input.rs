//! winit events to [`InputEvent`]s.

use std::collections::HashSet;

use glam::dvec2;
use winit::event::{
    ElementState, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
};

use crate::interaction::{Button, InputEvent, Key};

/// Pixels per wheel notch for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 120.0;

pub fn map_key(code: VirtualKeyCode) -> Option<Key> {
    let key = match code {
        VirtualKeyCode::Key1 => Key::Select(1),
        VirtualKeyCode::Key2 => Key::Select(2),
        VirtualKeyCode::Key3 => Key::Select(3),
        VirtualKeyCode::Key4 => Key::Select(4),
        VirtualKeyCode::Key5 => Key::Select(5),
        VirtualKeyCode::Key6 => Key::Select(6),
        VirtualKeyCode::Key7 => Key::Select(7),
        VirtualKeyCode::Key8 => Key::Select(8),
        VirtualKeyCode::Key9 => Key::Select(9),
        VirtualKeyCode::C => Key::ToggleColor,
        VirtualKeyCode::D => Key::ToggleDampening,
        VirtualKeyCode::R => Key::ResetView,
        VirtualKeyCode::J => Key::Julia,
        VirtualKeyCode::S => Key::Screenshot,
        VirtualKeyCode::H => Key::ToggleHelp,
        VirtualKeyCode::F11 => Key::ToggleFullscreen,
        VirtualKeyCode::Space => Key::Animate,
        VirtualKeyCode::Escape => Key::Exit,
        _ => return None,
    };
    Some(key)
}

pub fn map_button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::Left),
        MouseButton::Middle => Some(Button::Middle),
        MouseButton::Right => Some(Button::Right),
        MouseButton::Other(_) => None,
    }
}

/// Translates window events, dropping key auto-repeat.
#[derive(Debug, Default)]
pub struct InputTranslator {
    held: HashSet<VirtualKeyCode>,
}

impl InputTranslator {
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            WindowEvent::Focused(false) => {
                // not every platform sends releases for keys held across focus loss
                self.held.clear();
                None
            }
            WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                Some(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                })
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(code),
                        ..
                    },
                ..
            } => self.key(*code, *state),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button)?;
                Some(match state {
                    ElementState::Pressed => InputEvent::ButtonPressed(button),
                    ElementState::Released => InputEvent::ButtonReleased(button),
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::CursorMoved(dvec2(position.x, position.y)))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                    MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
                };
                Some(InputEvent::Wheel(notches))
            }
            _ => None,
        }
    }

    fn key(&mut self, code: VirtualKeyCode, state: ElementState) -> Option<InputEvent> {
        match state {
            ElementState::Pressed => {
                if !self.held.insert(code) {
                    return None;
                }
                map_key(code).map(InputEvent::KeyPressed)
            }
            ElementState::Released => {
                self.held.remove(&code);
                map_key(code).map(InputEvent::KeyReleased)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_select() {
        assert_eq!(map_key(VirtualKeyCode::Key1), Some(Key::Select(1)));
        assert_eq!(map_key(VirtualKeyCode::Key9), Some(Key::Select(9)));
        assert_eq!(map_key(VirtualKeyCode::Key0), None);
        assert_eq!(map_key(VirtualKeyCode::Space), Some(Key::Animate));
    }

    #[test]
    fn test_key_repeat_is_dropped() {
        let mut translator = InputTranslator::default();
        assert_eq!(
            translator.key(VirtualKeyCode::J, ElementState::Pressed),
            Some(InputEvent::KeyPressed(Key::Julia))
        );
        assert_eq!(translator.key(VirtualKeyCode::J, ElementState::Pressed), None);
        assert_eq!(
            translator.key(VirtualKeyCode::J, ElementState::Released),
            Some(InputEvent::KeyReleased(Key::Julia))
        );
        assert_eq!(
            translator.key(VirtualKeyCode::J, ElementState::Pressed),
            Some(InputEvent::KeyPressed(Key::Julia))
        );
    }

    #[test]
    fn test_focus_loss_forgets_held_keys() {
        let mut translator = InputTranslator::default();
        assert!(translator.key(VirtualKeyCode::J, ElementState::Pressed).is_some());
        assert_eq!(translator.translate(&WindowEvent::Focused(false)), None);
        assert!(translator.held.is_empty());
        assert_eq!(
            translator.key(VirtualKeyCode::J, ElementState::Pressed),
            Some(InputEvent::KeyPressed(Key::Julia))
        );
    }

    #[test]
    fn test_unmapped_keys_still_track_repeat() {
        let mut translator = InputTranslator::default();
        assert_eq!(translator.key(VirtualKeyCode::Q, ElementState::Pressed), None);
        assert!(translator.held.contains(&VirtualKeyCode::Q));
    }
}
