use std::f32::consts::TAU;

use glam::Vec3;
use log::{debug, info};
use rand::Rng;

use crate::game::constants::*;
use crate::game::physics::pmove::{self, PmoveCmd};
use crate::game::scene::{Node, NodeId, Scene, Shape};
use crate::game::weapons::projectile::EnemyProjectile;

pub struct Enemy {
    /// Root body node; hits on any child part resolve to it.
    pub root: NodeId,
    pub visor: NodeId,
    pub velocity: Vec3,
    pub move_dir: Vec3,
    pub jump_cooldown: f32,
    pub sprint_timer: f32,
    pub shoot_cooldown: f32,
    /// Hit and waiting to be removed. Shows the hit flash.
    pub dying: bool,
}

impl Enemy {
    fn spawn<R: Rng>(scene: &mut Scene, serial: u32, rng: &mut R) -> Self {
        let position = Vec3::new(
            rng.gen_range(-ENEMY_SPAWN_HALF_RANGE..ENEMY_SPAWN_HALF_RANGE),
            rng.gen_range(ENEMY_SPAWN_MIN_HEIGHT..ENEMY_SPAWN_MIN_HEIGHT + ENEMY_SPAWN_HEIGHT_SPREAD),
            rng.gen_range(-ENEMY_SPAWN_HALF_RANGE..ENEMY_SPAWN_HALF_RANGE),
        );

        let root = scene.add(Node::new(
            format!("enemy_{serial}"),
            position,
            Shape::Capsule {
                radius: ENEMY_RADIUS,
                height: ENEMY_HEIGHT,
            },
        ));

        let mut visor = Node::new(
            format!("enemy_{serial}_visor"),
            Vec3::new(0.0, 0.45, ENEMY_RADIUS),
            Shape::Box {
                half_extents: Vec3::new(0.25, 0.08, 0.06),
            },
        );
        visor.check_collisions = false;
        let visor = scene.add(visor);
        scene.set_parent(visor, Some(root));

        Self {
            root,
            visor,
            velocity: Vec3::ZERO,
            move_dir: Vec3::ZERO,
            jump_cooldown: 0.0,
            sprint_timer: 0.0,
            shoot_cooldown: next_shoot_cooldown(rng),
            dying: false,
        }
    }

    /// Random walk with occasional sprints and jumps.
    fn update<R: Rng>(&mut self, scene: &mut Scene, dt: f32, rng: &mut R) {
        let Some(position) = scene.absolute_position(self.root) else {
            return;
        };
        let on_ground = pmove::check_on_ground(scene, position);

        if self.move_dir.length() < 0.01 || rng.gen_bool(ENEMY_TURN_CHANCE) {
            let angle = rng.gen_range(0.0..TAU);
            self.move_dir = Vec3::new(angle.cos(), 0.0, angle.sin());
            self.sprint_timer = if rng.gen_bool(ENEMY_SPRINT_CHANCE) {
                ENEMY_SPRINT_SECS
            } else {
                0.0
            };
        }

        let speed = if self.sprint_timer > 0.0 { SPRINT_SPEED } else { WALK_SPEED };
        if self.sprint_timer > 0.0 {
            self.sprint_timer -= dt;
        }

        let jump = on_ground && self.jump_cooldown <= 0.0 && rng.gen_bool(ENEMY_JUMP_CHANCE);
        if jump {
            self.jump_cooldown = ENEMY_JUMP_COOLDOWN_SECS;
        }

        let cmd = PmoveCmd {
            wish_dir: self.move_dir,
            speed,
            jump,
        };
        let result = pmove::pmove(scene, self.root, self.velocity.y, on_ground, &cmd, dt);
        self.velocity = self.move_dir * speed + Vec3::Y * result.vel_y;

        if self.jump_cooldown > 0.0 {
            self.jump_cooldown -= dt;
        }
    }

    /// Counts the shot timer down and fires at `target` when it expires.
    fn try_shoot<R: Rng>(&mut self, scene: &Scene, target: Vec3, dt: f32, rng: &mut R) -> Option<EnemyProjectile> {
        self.shoot_cooldown -= dt;
        if self.shoot_cooldown > 0.0 || self.dying {
            return None;
        }
        self.shoot_cooldown = next_shoot_cooldown(rng);

        let muzzle = scene.absolute_position(self.root)? + Vec3::Y * ENEMY_MUZZLE_HEIGHT;
        let direction = (target - muzzle).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(EnemyProjectile::new(muzzle, direction, self.root))
    }
}

fn next_shoot_cooldown<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(ENEMY_SHOOT_COOLDOWN_MIN..ENEMY_SHOOT_COOLDOWN_MAX)
}

pub struct EnemyController {
    pub enemies: Vec<Enemy>,
    pub cap: u32,
    next_serial: u32,
}

impl EnemyController {
    pub fn new(cap: u32) -> Self {
        Self {
            enemies: Vec::new(),
            cap,
            next_serial: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn get(&self, root: NodeId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.root == root)
    }

    pub fn get_mut(&mut self, root: NodeId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.root == root)
    }

    /// Spawns one enemy unless the cap is reached.
    pub fn spawn_one<R: Rng>(&mut self, scene: &mut Scene, rng: &mut R) -> Option<NodeId> {
        if self.enemies.len() as u32 >= self.cap {
            debug!("enemy cap {} reached, spawn skipped", self.cap);
            return None;
        }
        let enemy = Enemy::spawn(scene, self.next_serial, rng);
        self.next_serial += 1;
        let root = enemy.root;
        self.enemies.push(enemy);
        Some(root)
    }

    /// Disposes every current enemy, then spawns `requested` clamped to the
    /// cap. Returns the number spawned.
    pub fn respawn_all<R: Rng>(&mut self, scene: &mut Scene, requested: u32, rng: &mut R) -> u32 {
        for enemy in self.enemies.drain(..) {
            scene.dispose(enemy.root);
        }

        self.spawn_enemies(scene, requested, rng)
    }

    /// Spawns up to `requested` enemies without exceeding the cap. Returns
    /// the number spawned.
    pub fn spawn_enemies<R: Rng>(&mut self, scene: &mut Scene, requested: u32, rng: &mut R) -> u32 {
        let count = (0..requested.min(self.cap))
            .map_while(|_| self.spawn_one(scene, rng))
            .count() as u32;
        info!("spawned {count} enemies (requested {requested}, cap {})", self.cap);
        count
    }

    /// Removes and disposes an enemy. Unknown roots are ignored.
    pub fn remove(&mut self, scene: &mut Scene, root: NodeId) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.root == root) else {
            return false;
        };
        self.enemies.remove(index);
        scene.dispose(root);
        true
    }

    /// Advances every enemy and returns the projectiles fired this frame.
    pub fn update<R: Rng>(&mut self, scene: &mut Scene, target: Vec3, dt: f32, rng: &mut R) -> Vec<EnemyProjectile> {
        let mut fired = Vec::new();
        for enemy in &mut self.enemies {
            enemy.update(scene, dt, rng);
            if let Some(projectile) = enemy.try_shoot(scene, target, dt, rng) {
                fired.push(projectile);
            }
        }
        fired
    }
}
