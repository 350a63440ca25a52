use glam::Vec3;

use crate::game::constants::*;
use crate::game::physics::Aabb;
use crate::game::scene::{NodeId, Scene};

/// What happened to a projectile during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOutcome {
    Flying,
    HitPlayer,
    HitWall,
    OutOfRange,
    Expired,
}

impl ProjectileOutcome {
    pub fn is_removed(self) -> bool {
        self != ProjectileOutcome::Flying
    }
}

/// A glowing sphere fired by an enemy at the player.
#[derive(Clone, Debug)]
pub struct EnemyProjectile {
    pub origin: Vec3,
    pub position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub lifetime: f32,
    pub owner: NodeId,
}

impl EnemyProjectile {
    pub fn new(origin: Vec3, direction: Vec3, owner: NodeId) -> Self {
        Self {
            origin,
            position: origin,
            direction: direction.normalize_or_zero(),
            speed: PROJECTILE_SPEED,
            lifetime: PROJECTILE_LIFETIME_SECS,
            owner,
        }
    }

    pub fn distance_travelled(&self) -> f32 {
        self.position.distance(self.origin)
    }

    /// Moves the projectile and reports the first removal condition that
    /// applies, checked in order: player, wall, range, lifetime.
    pub fn update(&mut self, dt: f32, scene: &Scene, player_bounds: Option<Aabb>) -> ProjectileOutcome {
        self.lifetime -= dt;
        self.position += self.direction * self.speed * dt;

        if player_bounds.map_or(false, |b| b.intersects_sphere(self.position, PROJECTILE_RADIUS)) {
            return ProjectileOutcome::HitPlayer;
        }

        if scene
            .first_intersecting_sphere(self.position, PROJECTILE_RADIUS, |node| node.is_wall())
            .is_some()
        {
            return ProjectileOutcome::HitWall;
        }

        if self.distance_travelled() > PROJECTILE_MAX_DISTANCE {
            return ProjectileOutcome::OutOfRange;
        }

        if self.lifetime <= 0.0 {
            return ProjectileOutcome::Expired;
        }

        ProjectileOutcome::Flying
    }
}
