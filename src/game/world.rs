use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;

use crate::audio::events::{AudioEvent, AudioEventQueue, Footsteps, SoundEffect};
use crate::game::camera::Camera;
use crate::game::combat::{self, CombatEvent};
use crate::game::constants::*;
use crate::game::enemy::EnemyController;
use crate::game::game_state::{GameState, GameSummary};
use crate::game::hitscan::{self, ImpactFlash, LaserBeam};
use crate::game::player::Player;
use crate::game::scene::Scene;
use crate::game::timers::TimerQueue;
use crate::game::weapons::projectile::{EnemyProjectile, ProjectileOutcome};
use crate::input::InputLatch;
use crate::settings::Settings;

/// Result of one trigger pull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotOutcome {
    pub hit_enemy: bool,
    pub beam_end: Vec3,
}

pub struct World {
    pub scene: Scene,
    pub player: Player,
    pub camera: Camera,
    pub enemies: EnemyController,
    pub projectiles: Vec<EnemyProjectile>,
    pub beams: Vec<LaserBeam>,
    pub impacts: Vec<ImpactFlash>,
    pub timers: TimerQueue<CombatEvent>,
    pub state: GameState,
    pub audio: AudioEventQueue,
    rng: StdRng,
    music_started: bool,
}

impl World {
    /// Builds the arena, the player and the initial enemy wave. The enemy
    /// request in `settings` is clamped to the cap and written back.
    pub fn new(settings: &mut Settings, rng: StdRng) -> Self {
        let mut scene = Scene::arena();
        let player = Player::spawn(&mut scene);
        let mut camera = Camera::new(settings.mouse_sensitivity, settings.fov);
        camera.follow(player.position(&scene));

        let mut world = Self {
            scene,
            player,
            camera,
            enemies: EnemyController::new(MAX_ENEMIES),
            projectiles: Vec::new(),
            beams: Vec::new(),
            impacts: Vec::new(),
            timers: TimerQueue::new(),
            state: GameState::new(),
            audio: AudioEventQueue::new(),
            rng,
            music_started: false,
        };
        world.respawn_all_enemies(settings);
        world
    }

    /// First pointer lock: starts the countdown and the background music.
    pub fn activate(&mut self) {
        if self.state.start() {
            info!("session started, {}s on the clock", self.state.time_left);
        }
        if !self.music_started {
            self.music_started = true;
            self.audio.push(AudioEvent::StartMusic);
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.state.frozen
    }

    /// Advances the simulation by one frame. Returns the summary on the
    /// frame the session ends.
    pub fn frame(&mut self, dt: f32, input: &mut InputLatch) -> Option<GameSummary> {
        if self.state.frozen {
            input.reset_one_shot_inputs();
            return None;
        }

        let (dx, dy) = input.take_mouse_delta();
        self.camera.look(dx, dy);

        if let Some(summary) = self.state.update(dt) {
            info!("time up: score {} accuracy {:.1}%", summary.score, summary.accuracy);
            self.audio.push(AudioEvent::Footsteps(Footsteps::Silent));
            input.reset_one_shot_inputs();
            return Some(summary);
        }

        for event in self.timers.advance(dt) {
            combat::apply_event(event, &mut self.scene, &mut self.enemies, &mut self.timers, &mut self.rng);
        }

        self.player
            .update_movement(&mut self.scene, &self.camera, input, dt, &mut self.audio);
        let player_position = self.player.position(&self.scene);
        self.camera.follow(player_position);

        let fired = self.enemies.update(&mut self.scene, player_position, dt, &mut self.rng);
        self.projectiles.extend(fired);
        self.update_projectiles(dt);

        self.beams.retain_mut(|beam| beam.update(dt));
        self.impacts.retain_mut(|impact| impact.update(dt));
        self.player.update_damage_timers(dt);

        input.reset_one_shot_inputs();
        None
    }

    fn update_projectiles(&mut self, dt: f32) {
        let player_bounds = self.scene.bounds(self.player.node);
        let scene = &self.scene;
        let state = &mut self.state;
        let player = &mut self.player;

        self.projectiles.retain_mut(|projectile| {
            let outcome = projectile.update(dt, scene, player_bounds);
            match outcome {
                ProjectileOutcome::HitPlayer => combat::apply_projectile_hit(state, player),
                ProjectileOutcome::Flying => {}
                _ => debug!("projectile from {} removed: {outcome:?}", projectile.owner),
            }
            !outcome.is_removed()
        });
    }

    /// Fires the laser. Returns `None` once the session is over.
    pub fn shoot(&mut self) -> Option<ShotOutcome> {
        if self.state.frozen {
            return None;
        }

        let hit = hitscan::hitscan_trace(&self.scene, &self.camera, self.player.node);
        self.beams.push(LaserBeam::new(hit.origin, hit.end));
        if hit.hit {
            self.impacts.push(ImpactFlash::new(hit.end));
        }
        self.audio.play(SoundEffect::Shoot);

        let hit_enemy = combat::resolve_shot(
            &hit,
            &self.scene,
            &mut self.enemies,
            &mut self.timers,
            &mut self.audio,
        );
        self.state.record_shot(hit_enemy);

        Some(ShotOutcome {
            hit_enemy,
            beam_end: hit.end,
        })
    }

    /// Replaces every enemy with a fresh wave of the requested size, clamped
    /// to the cap. The effective count is written back to `settings`.
    pub fn respawn_all_enemies(&mut self, settings: &mut Settings) -> u32 {
        let count = self
            .enemies
            .respawn_all(&mut self.scene, settings.enemy_count, &mut self.rng);
        settings.enemy_count = count;
        count
    }

    /// Applies view settings to the live camera.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.camera.angular_sensibility = settings.mouse_sensitivity;
        self.camera.fov_degrees = settings.fov;
    }

    /// Starts a fresh session. Pending timers and projectiles are dropped;
    /// the random generator carries on.
    pub fn reset(&mut self, settings: &mut Settings) {
        self.scene = Scene::arena();
        self.player = Player::spawn(&mut self.scene);
        self.camera = Camera::new(settings.mouse_sensitivity, settings.fov);
        self.camera.follow(self.player.position(&self.scene));
        self.enemies = EnemyController::new(MAX_ENEMIES);
        self.projectiles.clear();
        self.beams.clear();
        self.impacts.clear();
        self.timers.clear();
        self.state = GameState::new();
        self.audio.push(AudioEvent::Footsteps(Footsteps::Silent));
        self.respawn_all_enemies(settings);
        info!("session reset");
    }

    pub fn hud_line(&self) -> String {
        format!("Score: {} | Time Left: {}s", self.state.score, self.state.time_left)
    }

    pub fn summary(&self) -> GameSummary {
        self.state.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use winit::keyboard::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn world(enemies: u32) -> (World, Settings) {
        let mut settings = Settings {
            enemy_count: enemies,
            ..Settings::default()
        };
        let world = World::new(&mut settings, StdRng::seed_from_u64(11));
        (world, settings)
    }

    #[test]
    fn enemy_request_is_clamped_and_written_back() {
        let (world, settings) = world(25);
        assert_eq!(world.enemies.len(), 20);
        assert_eq!(settings.enemy_count, 20);
    }

    #[test]
    fn hud_line_format() {
        let (mut world, _) = world(0);
        world.state.score = 30;
        assert_eq!(world.hud_line(), "Score: 30 | Time Left: 60s");
    }

    #[test]
    fn activate_starts_music_once() {
        let (mut world, _) = world(0);
        world.activate();
        world.activate();

        let starts = world
            .audio
            .drain()
            .into_iter()
            .filter(|e| *e == AudioEvent::StartMusic)
            .count();
        assert_eq!(starts, 1);
        assert!(world.state.started);
    }

    #[test]
    fn missed_shot_counts_and_leaves_beam_only() {
        let (mut world, _) = world(0);
        world.camera.pitch = -1.5;

        let outcome = world.shoot().unwrap();
        assert!(!outcome.hit_enemy);
        assert_eq!(world.state.shots_fired, 1);
        assert_eq!(world.state.score, 0);
        assert_eq!(world.beams.len(), 1);
        assert!(world.impacts.is_empty());
        assert!(world.audio.drain().contains(&AudioEvent::Play(SoundEffect::Shoot)));
    }

    #[test]
    fn effects_expire_after_their_lifetime() {
        let (mut world, _) = world(0);
        let mut input = InputLatch::new();
        world.shoot();

        for _ in 0..30 {
            world.frame(DT, &mut input);
        }
        assert!(world.beams.is_empty());
        assert!(world.impacts.is_empty());
    }

    #[test]
    fn frame_consumes_one_shot_inputs() {
        let (mut world, _) = world(0);
        let mut input = InputLatch::new();
        input.handle_key_press(KeyCode::Space);
        input.handle_key_press(KeyCode::KeyQ);

        world.frame(DT, &mut input);
        assert!(!input.jump && !input.teleport);
        assert!(!input.teleport_ready);
    }

    #[test]
    fn session_end_freezes_world() {
        let (mut world, _) = world(0);
        let mut input = InputLatch::new();
        world.activate();

        let mut summary = None;
        for _ in 0..(SESSION_SECS * 60 + 10) {
            if let Some(s) = world.frame(DT, &mut input) {
                summary = Some(s);
            }
        }

        assert_eq!(summary, Some(GameSummary { score: 0, accuracy: 0.0 }));
        assert!(world.is_frozen());
        assert!(world.shoot().is_none());
        assert_eq!(world.state.time_left, 0);
    }

    #[test]
    fn reset_restores_clock_and_wave() {
        let (mut world, mut settings) = world(4);
        world.activate();
        world.state.score = 50;
        world.projectiles.push(EnemyProjectile::new(Vec3::ZERO, Vec3::Z, world.enemies.enemies[0].root));

        world.reset(&mut settings);
        assert_eq!(world.state.score, 0);
        assert_eq!(world.state.time_left, SESSION_SECS);
        assert!(!world.state.started);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemies.len(), 4);
    }
}
