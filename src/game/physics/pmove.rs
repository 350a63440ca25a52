use glam::Vec3;

use crate::game::constants::{GRAVITY, GROUND_PROBE_LENGTH, JUMP_FORCE};
use crate::game::physics::collision::Ray;
use crate::game::scene::{NodeId, Scene};

#[derive(Clone, Copy, Debug)]
pub struct PmoveCmd {
    /// Horizontal wish direction, not necessarily normalized.
    pub wish_dir: Vec3,
    pub speed: f32,
    pub jump: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct PmoveResult {
    pub position: Vec3,
    pub vel_y: f32,
    pub jumped: bool,
    pub moving: bool,
}

/// Short downward ray against the node named `ground`.
pub fn check_on_ground(scene: &Scene, position: Vec3) -> bool {
    let ray = Ray::new(position, Vec3::NEG_Y, GROUND_PROBE_LENGTH);
    scene.pick_with_ray(&ray, |_, node| node.is_ground()).hit
}

/// Zero while grounded, the jump impulse on a grounded jump, gravity otherwise.
pub fn vertical_velocity(vel_y: f32, on_ground: bool, jump: bool, dt: f32) -> (f32, bool) {
    match (on_ground, jump) {
        (true, true) => (JUMP_FORCE, true),
        (true, false) => (0.0, false),
        (false, _) => (vel_y + GRAVITY * dt, false),
    }
}

pub fn horizontal_velocity(wish_dir: Vec3, speed: f32) -> Vec3 {
    let flat = Vec3::new(wish_dir.x, 0.0, wish_dir.z);
    if flat.length_squared() > 0.01 {
        flat.normalize() * speed
    } else {
        Vec3::ZERO
    }
}

pub fn pmove(scene: &mut Scene, body: NodeId, vel_y: f32, on_ground: bool, cmd: &PmoveCmd, dt: f32) -> PmoveResult {
    let horizontal = horizontal_velocity(cmd.wish_dir, cmd.speed);
    let (vel_y, jumped) = vertical_velocity(vel_y, on_ground, cmd.jump, dt);

    let delta = Vec3::new(horizontal.x, vel_y, horizontal.z) * dt;
    let position = scene.move_with_collisions(body, delta);

    PmoveResult {
        position,
        vel_y,
        jumped,
        moving: horizontal != Vec3::ZERO,
    }
}
