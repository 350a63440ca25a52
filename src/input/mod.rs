use winit::keyboard::KeyCode;

/// Keyboard and mouse state sampled by the frame loop.
///
/// Movement keys are level-sensitive. `jump` and `teleport` are one-shot
/// flags cleared by [`InputLatch::reset_one_shot_inputs`] once per frame.
/// `teleport` additionally needs the key to be released before it can fire
/// again, so key repeat or a held key never teleports twice.
#[derive(Debug)]
pub struct InputLatch {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub teleport: bool,
    pub teleport_ready: bool,
    mouse_dx: f32,
    mouse_dy: f32,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            sprint: false,
            jump: false,
            teleport: false,
            teleport_ready: true,
            mouse_dx: 0.0,
            mouse_dy: 0.0,
        }
    }
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_press(&mut self, keycode: KeyCode) {
        match keycode {
            KeyCode::KeyW => self.forward = true,
            KeyCode::KeyS => self.back = true,
            KeyCode::KeyA => self.left = true,
            KeyCode::KeyD => self.right = true,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.sprint = true,
            KeyCode::Space => self.jump = true,
            KeyCode::KeyQ => {
                if self.teleport_ready {
                    self.teleport = true;
                    self.teleport_ready = false;
                }
            }
            _ => {}
        }
    }

    pub fn handle_key_release(&mut self, keycode: KeyCode) {
        match keycode {
            KeyCode::KeyW => self.forward = false,
            KeyCode::KeyS => self.back = false,
            KeyCode::KeyA => self.left = false,
            KeyCode::KeyD => self.right = false,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.sprint = false,
            KeyCode::KeyQ => self.teleport_ready = true,
            _ => {}
        }
    }

    pub fn accumulate_mouse(&mut self, dx: f32, dy: f32) {
        self.mouse_dx += dx;
        self.mouse_dy += dy;
    }

    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        let delta = (self.mouse_dx, self.mouse_dy);
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
        delta
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn reset_one_shot_inputs(&mut self) {
        self.jump = false;
        self.teleport = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_teleport_key_fires_once() {
        let mut input = InputLatch::new();

        input.handle_key_press(KeyCode::KeyQ);
        assert!(input.teleport);
        input.reset_one_shot_inputs();

        // Key repeat while held.
        input.handle_key_press(KeyCode::KeyQ);
        input.handle_key_press(KeyCode::KeyQ);
        assert!(!input.teleport);

        input.handle_key_release(KeyCode::KeyQ);
        input.handle_key_press(KeyCode::KeyQ);
        assert!(input.teleport);
    }

    #[test]
    fn reset_keeps_teleport_gate_closed() {
        let mut input = InputLatch::new();
        input.handle_key_press(KeyCode::KeyQ);
        input.reset_one_shot_inputs();
        assert!(!input.teleport_ready);
    }

    #[test]
    fn jump_is_consumed_by_reset() {
        let mut input = InputLatch::new();
        input.handle_key_press(KeyCode::Space);
        assert!(input.jump);
        input.reset_one_shot_inputs();
        assert!(!input.jump);
    }

    #[test]
    fn movement_keys_follow_key_state() {
        let mut input = InputLatch::new();
        input.handle_key_press(KeyCode::KeyW);
        input.handle_key_press(KeyCode::ShiftLeft);
        input.reset_one_shot_inputs();
        assert!(input.forward && input.sprint);

        input.handle_key_release(KeyCode::KeyW);
        assert!(!input.forward);
        assert!(input.sprint);
    }

    #[test]
    fn mouse_delta_is_taken_once() {
        let mut input = InputLatch::new();
        input.accumulate_mouse(3.0, -1.0);
        input.accumulate_mouse(2.0, 0.5);
        assert_eq!(input.take_mouse_delta(), (5.0, -0.5));
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
    }
}
