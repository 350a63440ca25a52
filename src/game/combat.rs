use log::debug;
use rand::Rng;

use crate::audio::events::{AudioEventQueue, SoundEffect};
use crate::game::constants::*;
use crate::game::enemy::EnemyController;
use crate::game::game_state::GameState;
use crate::game::hitscan::HitResult;
use crate::game::player::Player;
use crate::game::scene::{NodeId, Scene};
use crate::game::timers::TimerQueue;

/// Deferred enemy lifecycle steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    RemoveEnemy(NodeId),
    SpawnEnemy,
}

/// Resolves a laser hit against the enemy list. A hit on any part of an
/// enemy counts against its root. Returns whether a live enemy was hit.
pub fn resolve_shot(
    hit: &HitResult,
    scene: &Scene,
    enemies: &mut EnemyController,
    timers: &mut TimerQueue<CombatEvent>,
    audio: &mut AudioEventQueue,
) -> bool {
    let Some(picked) = hit.picked_node else {
        return false;
    };
    let root = scene.root_of(picked);

    let Some(enemy) = enemies.get_mut(root) else {
        return false;
    };
    if enemy.dying {
        return false;
    }

    enemy.dying = true;
    audio.play(SoundEffect::Hit);
    timers.schedule(ENEMY_REMOVE_DELAY_SECS, CombatEvent::RemoveEnemy(root));
    debug!("enemy {root} hit");
    true
}

/// Applies a timer event that fell due.
pub fn apply_event<R: Rng>(
    event: CombatEvent,
    scene: &mut Scene,
    enemies: &mut EnemyController,
    timers: &mut TimerQueue<CombatEvent>,
    rng: &mut R,
) {
    match event {
        CombatEvent::RemoveEnemy(root) => {
            if enemies.remove(scene, root) {
                timers.schedule(ENEMY_RESPAWN_DELAY_SECS, CombatEvent::SpawnEnemy);
            }
        }
        CombatEvent::SpawnEnemy => {
            if let Some(root) = enemies.spawn_one(scene, rng) {
                debug!("enemy {root} respawned");
            }
        }
    }
}

/// Score penalty and damage flash for a projectile that reached the player.
pub fn apply_projectile_hit(state: &mut GameState, player: &mut Player) {
    state.penalize(PROJECTILE_HIT_PENALTY);
    if player.take_hit() {
        debug!("player hit, score now {}", state.score);
    }
}
