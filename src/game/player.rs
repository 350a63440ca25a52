use glam::Vec3;
use log::debug;

use crate::audio::events::{AudioEvent, AudioEventQueue, Footsteps, SoundEffect};
use crate::game::camera::Camera;
use crate::game::constants::*;
use crate::game::physics::collision::Ray;
use crate::game::physics::pmove::{self, PmoveCmd};
use crate::game::scene::{Node, NodeId, Scene, Shape};
use crate::input::InputLatch;

pub struct Player {
    pub node: NodeId,
    pub velocity: Vec3,
    pub is_grounded: bool,
    pub was_grounded: bool,
    /// Forward key state captured when leaving the ground.
    pub simulate_forward: bool,
    /// Sprint key state captured when leaving the ground.
    pub simulate_sprint: bool,
    pub was_teleporting: bool,
    pub damage_cooldown: f32,
    pub damage_flash: f32,
    pub footsteps: Footsteps,
}

impl Player {
    pub fn spawn(scene: &mut Scene) -> Self {
        let node = scene.add(Node::new(
            PLAYER_NAME,
            Vec3::from(PLAYER_SPAWN),
            Shape::Capsule {
                radius: PLAYER_RADIUS,
                height: PLAYER_HEIGHT,
            },
        ));

        Self {
            node,
            velocity: Vec3::ZERO,
            is_grounded: false,
            was_grounded: true,
            simulate_forward: false,
            simulate_sprint: false,
            was_teleporting: false,
            damage_cooldown: 0.0,
            damage_flash: 0.0,
            footsteps: Footsteps::Silent,
        }
    }

    pub fn position(&self, scene: &Scene) -> Vec3 {
        scene.absolute_position(self.node).unwrap_or(Vec3::from(PLAYER_SPAWN))
    }

    pub fn is_flashing(&self) -> bool {
        self.damage_flash > 0.0
    }

    /// Starts the damage flash unless one was triggered within the cooldown.
    pub fn take_hit(&mut self) -> bool {
        if self.damage_cooldown > 0.0 {
            return false;
        }
        self.damage_flash = DAMAGE_FLASH_SECS;
        self.damage_cooldown = DAMAGE_COOLDOWN_SECS;
        true
    }

    pub fn update_damage_timers(&mut self, dt: f32) {
        self.damage_flash = (self.damage_flash - dt).max(0.0);
        self.damage_cooldown = (self.damage_cooldown - dt).max(0.0);
    }

    pub fn update_movement(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        input: &InputLatch,
        dt: f32,
        audio: &mut AudioEventQueue,
    ) {
        let position = self.position(scene);
        let on_ground = pmove::check_on_ground(scene, position);

        if self.was_grounded && !on_ground {
            self.simulate_forward = input.forward;
            self.simulate_sprint = input.sprint;
        }
        if on_ground {
            self.simulate_forward = false;
            self.simulate_sprint = false;
            self.velocity.y = 0.0;
        }
        self.was_grounded = on_ground;
        self.is_grounded = on_ground;

        let use_forward = input.forward || (!on_ground && self.simulate_forward);
        let use_sprint = (on_ground && input.sprint) || (!on_ground && self.simulate_sprint);
        let speed = if use_sprint { SPRINT_SPEED } else { WALK_SPEED };

        let forward = camera.flat_forward();
        let right = camera.flat_right();
        let mut wish_dir = Vec3::ZERO;
        if use_forward {
            wish_dir += forward;
        }
        if input.back {
            wish_dir -= forward;
        }
        if input.left {
            wish_dir -= right;
        }
        if input.right {
            wish_dir += right;
        }

        let cmd = PmoveCmd {
            wish_dir,
            speed,
            jump: input.jump,
        };
        let result = pmove::pmove(scene, self.node, self.velocity.y, on_ground, &cmd, dt);
        self.velocity = Vec3::new(0.0, result.vel_y, 0.0) + pmove::horizontal_velocity(wish_dir, speed);

        if result.jumped {
            audio.play(SoundEffect::Jump);
        }

        let footsteps = match (on_ground && result.moving, use_sprint) {
            (false, _) => Footsteps::Silent,
            (true, true) => Footsteps::Sprint,
            (true, false) => Footsteps::Walk,
        };
        if footsteps != self.footsteps {
            self.footsteps = footsteps;
            audio.push(AudioEvent::Footsteps(footsteps));
        }

        if input.teleport && !self.was_teleporting {
            self.was_teleporting = true;
            self.teleport(scene, camera, audio);
        }
        if !input.teleport {
            self.was_teleporting = false;
        }
    }

    fn teleport(&mut self, scene: &mut Scene, camera: &Camera, audio: &mut AudioEventQueue) {
        let ray = Ray::new(camera.position, camera.direction(), TELEPORT_DISTANCE);
        let player = self.node;
        let pick = scene.pick_with_ray(&ray, |id, node| node.pickable && scene.root_of(id) != player);

        let target = match pick.picked_point {
            Some(point) => point + Vec3::Y * TELEPORT_LIFT,
            None => ray.end(),
        };

        debug!("teleport to {target}");
        scene.set_position(self.node, target);
        scene.resolve_overlaps(self.node);
        self.velocity.y = 0.0;
        audio.play(SoundEffect::Teleport);
    }
}
