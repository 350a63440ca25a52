use glam::Vec3;

use crate::game::camera::Camera;
use crate::game::constants::*;
use crate::game::physics::Ray;
use crate::game::scene::{NodeId, Scene};

pub struct HitResult {
    pub hit: bool,
    pub picked_node: Option<NodeId>,
    pub origin: Vec3,
    /// Hit point, or the end of the ray on a miss.
    pub end: Vec3,
}

/// Laser line from the muzzle to the hit point, fading out linearly.
pub struct LaserBeam {
    pub start: Vec3,
    pub end: Vec3,
    pub life: f32,
}

impl LaserBeam {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            life: BEAM_LIFETIME_SECS,
        }
    }

    pub fn alpha(&self) -> f32 {
        (self.life * BEAM_FADE_RATE).max(0.0)
    }

    pub fn update(&mut self, dt: f32) -> bool {
        self.life -= dt;
        self.life > 0.0
    }
}

/// Small glowing sphere left where the laser struck.
pub struct ImpactFlash {
    pub position: Vec3,
    pub life: f32,
}

impl ImpactFlash {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            life: IMPACT_LIFETIME_SECS,
        }
    }

    pub fn alpha(&self) -> f32 {
        (self.life * IMPACT_FADE_RATE).max(0.0)
    }

    pub fn update(&mut self, dt: f32) -> bool {
        self.life -= dt;
        self.life > 0.0
    }
}

/// Traces the player's laser from just in front of the camera, ignoring the
/// shooter's own body.
pub fn hitscan_trace(scene: &Scene, camera: &Camera, shooter: NodeId) -> HitResult {
    let direction = camera.direction();
    let origin = camera.position + direction * SHOT_MUZZLE_OFFSET;
    let ray = Ray::new(origin, direction, SHOT_RANGE);

    let pick = scene.pick_with_ray(&ray, |id, node| node.pickable && scene.root_of(id) != shooter);

    HitResult {
        hit: pick.hit,
        picked_node: pick.picked_node,
        origin,
        end: pick.picked_point.unwrap_or_else(|| ray.end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scene::{Node, Shape};
    use approx::assert_relative_eq;

    fn scene_with_shooter() -> (Scene, NodeId, Camera) {
        let mut scene = Scene::arena();
        let shooter = scene.add(Node::new(
            PLAYER_NAME,
            Vec3::new(0.0, 1.0, 0.0),
            Shape::Capsule {
                radius: PLAYER_RADIUS,
                height: PLAYER_HEIGHT,
            },
        ));
        let mut camera = Camera::new(1000.0, 75.0);
        camera.follow(Vec3::new(0.0, 1.0, 0.0));
        (scene, shooter, camera)
    }

    #[test]
    fn miss_ends_at_full_range() {
        let (scene, shooter, mut camera) = scene_with_shooter();
        // Straight up: nothing above the arena.
        camera.pitch = -1.5;

        let result = hitscan_trace(&scene, &camera, shooter);
        assert!(!result.hit);
        assert_relative_eq!(result.origin.distance(result.end), SHOT_RANGE, epsilon = 1e-3);
    }

    #[test]
    fn shot_skips_shooter_and_hits_target() {
        let (mut scene, shooter, camera) = scene_with_shooter();
        let target = scene.add(Node::new("target", Vec3::new(0.0, 2.0, 10.0), Shape::Sphere { radius: 1.0 }));

        let result = hitscan_trace(&scene, &camera, shooter);
        assert!(result.hit);
        assert_eq!(result.picked_node, Some(target));
        assert_relative_eq!(result.end.z, 9.0, epsilon = 1e-3);
    }

    #[test]
    fn effects_fade_and_expire() {
        let mut beam = LaserBeam::new(Vec3::ZERO, Vec3::Z);
        assert_relative_eq!(beam.alpha(), BEAM_LIFETIME_SECS * BEAM_FADE_RATE);
        assert!(beam.update(0.1));
        assert_relative_eq!(beam.alpha(), 0.2 * BEAM_FADE_RATE, epsilon = 1e-5);
        assert!(!beam.update(0.25));
        assert_eq!(beam.alpha(), 0.0);

        let mut impact = ImpactFlash::new(Vec3::ZERO);
        assert_relative_eq!(impact.alpha(), 1.0);
        assert!(!impact.update(0.2));
    }
}
