use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::game::constants::CAMERA_EYE_OFFSET;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// First-person camera. Yaw 0 looks down +Z, positive pitch looks down.
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_degrees: f32,
    /// Mouse pixels per radian; larger is slower.
    pub angular_sensibility: f32,
}

impl Camera {
    pub fn new(angular_sensibility: f32, fov_degrees: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees,
            angular_sensibility,
        }
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        if self.angular_sensibility <= 0.0 {
            return;
        }
        self.yaw += dx / self.angular_sensibility;
        self.pitch = (self.pitch + dy / self.angular_sensibility).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
    }

    pub fn flat_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(sin_yaw, 0.0, cos_yaw)
    }

    pub fn flat_right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    pub fn follow(&mut self, player_position: Vec3) {
        self.position = player_position + Vec3::Y * CAMERA_EYE_OFFSET;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_orientation_looks_down_z() {
        let camera = Camera::new(1000.0, 75.0);
        assert!(camera.direction().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(camera.flat_right().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn look_scales_by_sensibility() {
        let mut camera = Camera::new(1000.0, 75.0);
        camera.look(500.0, 0.0);
        assert_relative_eq!(camera.yaw, 0.5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(100.0, 75.0);
        camera.look(0.0, 10_000.0);
        assert_relative_eq!(camera.pitch, PITCH_LIMIT);
        assert!(camera.direction().y < -0.99);
    }

    #[test]
    fn flat_vectors_ignore_pitch() {
        let mut camera = Camera::new(1.0, 75.0);
        camera.look(0.3, 0.7);
        assert_relative_eq!(camera.flat_forward().y, 0.0);
        assert_relative_eq!(camera.flat_forward().length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.flat_forward().dot(camera.flat_right()), 0.0, epsilon = 1e-6);
    }
}
