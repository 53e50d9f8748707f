//! Feeds window input into the camera.

use glium::glutin::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode};

use crate::controls::CameraInput;
use crate::glm;

/// WASD to walk, Space/E and C/Q to rise and sink, shift to sprint
pub fn keyboard(input: &mut CameraInput, key: &KeyboardInput) {
    let Some(code) = key.virtual_keycode else {
        return;
    };
    let pressed = key.state == ElementState::Pressed;

    match code {
        VirtualKeyCode::W | VirtualKeyCode::Up => input.forward = pressed,
        VirtualKeyCode::S | VirtualKeyCode::Down => input.backward = pressed,
        VirtualKeyCode::A | VirtualKeyCode::Left => input.left = pressed,
        VirtualKeyCode::D | VirtualKeyCode::Right => input.right = pressed,
        VirtualKeyCode::Space | VirtualKeyCode::E => input.up = pressed,
        VirtualKeyCode::C | VirtualKeyCode::Q => input.down = pressed,
        VirtualKeyCode::LShift | VirtualKeyCode::RShift => input.sprint = pressed,
        _ => (),
    }
}

/// holding the right button turns on mouse look
pub fn mouse_button(input: &mut CameraInput, button: MouseButton, state: ElementState) {
    if button == MouseButton::Right {
        input.look_active = state == ElementState::Pressed;
    }
}

/// raw mouse motion, accumulated until the next frame
pub fn mouse_move(input: &mut CameraInput, delta: &(f64, f64)) {
    input.mouse_delta += glm::vec2(delta.0 as f32, delta.1 as f32);
}

/// drop held keys, e.g. when the window loses focus and would miss the releases
pub fn release_all(input: &mut CameraInput) {
    *input = CameraInput::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(deprecated)]
    fn key(code: VirtualKeyCode, state: ElementState) -> KeyboardInput {
        KeyboardInput {
            scancode: 0,
            state,
            virtual_keycode: Some(code),
            modifiers: Default::default(),
        }
    }

    #[test]
    fn keys_toggle_movement() {
        let mut input = CameraInput::default();
        keyboard(&mut input, &key(VirtualKeyCode::W, ElementState::Pressed));
        keyboard(&mut input, &key(VirtualKeyCode::LShift, ElementState::Pressed));
        assert!(input.forward && input.sprint);

        keyboard(&mut input, &key(VirtualKeyCode::W, ElementState::Released));
        assert!(!input.forward);
        assert!(input.sprint);
    }

    #[test]
    fn mouse_motion_accumulates() {
        let mut input = CameraInput::default();
        mouse_move(&mut input, &(3.0, -1.0));
        mouse_move(&mut input, &(2.0, 4.0));
        assert_eq!(input.mouse_delta, glm::vec2(5.0, 3.0));
    }

    #[test]
    fn only_right_button_looks() {
        let mut input = CameraInput::default();
        mouse_button(&mut input, MouseButton::Left, ElementState::Pressed);
        assert!(!input.look_active);
        mouse_button(&mut input, MouseButton::Right, ElementState::Pressed);
        assert!(input.look_active);
        release_all(&mut input);
        assert!(!input.look_active);
    }
}
