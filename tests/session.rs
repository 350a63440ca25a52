use approx::assert_relative_eq;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};
use winit::keyboard::KeyCode;

use arena::game::constants::*;
use arena::game::weapons::projectile::EnemyProjectile;
use arena::game::World;
use arena::input::InputLatch;
use arena::settings::Settings;

const DT: f32 = 1.0 / 60.0;

fn world_with(enemies: u32) -> (World, Settings) {
    let mut settings = Settings {
        enemy_count: enemies,
        ..Settings::default()
    };
    let world = World::new(&mut settings, StdRng::seed_from_u64(42));
    (world, settings)
}

#[fixture]
fn empty_world() -> World {
    world_with(0).0
}

fn settle(world: &mut World, input: &mut InputLatch) {
    for _ in 0..120 {
        world.frame(DT, input);
    }
}

#[rstest]
#[case(0, 0)]
#[case(10, 10)]
#[case(20, 20)]
#[case(25, 20)]
fn enemy_requests_are_capped(#[case] requested: u32, #[case] expected: u32) {
    let (mut world, mut settings) = world_with(requested);
    assert_eq!(world.enemies.len() as u32, expected);
    assert_eq!(settings.enemy_count, expected);

    settings.enemy_count = requested + 5;
    let spawned = world.respawn_all_enemies(&mut settings);
    assert_eq!(spawned, (requested + 5).min(MAX_ENEMIES));
    assert_eq!(settings.enemy_count, spawned);
}

#[rstest]
fn teleport_fires_once_per_key_press(mut empty_world: World) {
    let mut input = InputLatch::new();
    settle(&mut empty_world, &mut input);
    let start = empty_world.player.position(&empty_world.scene);

    input.handle_key_press(KeyCode::KeyQ);
    empty_world.frame(DT, &mut input);
    let first = empty_world.player.position(&empty_world.scene);
    assert_relative_eq!(first.z - start.z, TELEPORT_DISTANCE, epsilon = 0.01);

    // Key repeat while held.
    for _ in 0..30 {
        input.handle_key_press(KeyCode::KeyQ);
        empty_world.frame(DT, &mut input);
    }
    let held = empty_world.player.position(&empty_world.scene);
    assert_relative_eq!(held.z, first.z, epsilon = 1e-4);

    input.handle_key_release(KeyCode::KeyQ);
    input.handle_key_press(KeyCode::KeyQ);
    empty_world.frame(DT, &mut input);
    let second = empty_world.player.position(&empty_world.scene);
    assert!(second.z > held.z + 1.0);
}

#[rstest]
fn teleporting_at_a_wall_keeps_player_in_arena(mut empty_world: World) {
    let mut input = InputLatch::new();
    settle(&mut empty_world, &mut input);
    let y = empty_world.player.position(&empty_world.scene).y;
    empty_world
        .scene
        .set_position(empty_world.player.node, Vec3::new(0.0, y, 42.0));
    empty_world.frame(DT, &mut input);

    input.handle_key_press(KeyCode::KeyQ);
    empty_world.frame(DT, &mut input);
    input.handle_key_release(KeyCode::KeyQ);

    input.handle_key_press(KeyCode::KeyW);
    for _ in 0..120 {
        empty_world.frame(DT, &mut input);
    }
    let end = empty_world.player.position(&empty_world.scene);
    assert!(end.z < ARENA_SIZE * 0.5, "left the arena at {end}");
    assert!(end.y > 0.0, "fell through the floor at {end}");
}

#[rstest]
fn grounded_player_has_zero_vertical_velocity(mut empty_world: World) {
    let mut input = InputLatch::new();
    settle(&mut empty_world, &mut input);

    for _ in 0..10 {
        empty_world.frame(DT, &mut input);
        assert!(empty_world.player.is_grounded);
        assert_eq!(empty_world.player.velocity.y, 0.0);
    }
}

#[rstest]
fn projectile_expires_exactly_once(mut empty_world: World) {
    let owner = empty_world.player.node;
    // Aimed straight up from high above the arena so nothing intercepts it.
    let mut projectile = EnemyProjectile::new(Vec3::new(0.0, 50.0, 0.0), Vec3::Y, owner);
    projectile.speed = 1.0;
    empty_world.projectiles.push(projectile);

    let mut input = InputLatch::new();
    let mut previous = PROJECTILE_LIFETIME_SECS;
    let mut frames = 0;
    while !empty_world.projectiles.is_empty() {
        empty_world.frame(DT, &mut input);
        frames += 1;
        if let Some(p) = empty_world.projectiles.first() {
            assert!(p.lifetime < previous);
            previous = p.lifetime;
        }
        assert!(frames < 400, "projectile never expired");
    }
    assert!(empty_world.projectiles.is_empty());
}

#[rstest]
fn projectile_hit_costs_five_points(mut empty_world: World) {
    empty_world.state.score = 7;
    let owner = empty_world.player.node;
    let player_position = empty_world.player.position(&empty_world.scene);
    empty_world
        .projectiles
        .push(EnemyProjectile::new(player_position - Vec3::Z * 0.5, Vec3::Z, owner));

    let mut input = InputLatch::new();
    empty_world.frame(DT, &mut input);

    assert_eq!(empty_world.state.score, 2);
    assert!(empty_world.player.is_flashing());
    assert!(empty_world.projectiles.is_empty());
}

#[test]
fn shooting_scores_and_tracks_accuracy() {
    let (mut world, _) = world_with(1);
    assert_eq!(world.state.accuracy(), 0.0);

    let root = world.enemies.enemies[0].root;
    let eye = world.camera.position;
    world.scene.set_position(root, eye + Vec3::Z * 10.0);

    let hit = world.shoot().unwrap();
    assert!(hit.hit_enemy);
    assert_eq!(world.state.score, SHOT_SCORE);
    assert_relative_eq!(world.state.accuracy(), 100.0);

    // Already dying: a second shot at the same enemy scores nothing.
    let again = world.shoot().unwrap();
    assert!(!again.hit_enemy);
    assert_eq!(world.state.score, SHOT_SCORE);
    assert_relative_eq!(world.state.accuracy(), 50.0);
}

#[test]
fn hit_enemy_is_replaced_after_delay() {
    let (mut world, _) = world_with(1);
    let root = world.enemies.enemies[0].root;
    let eye = world.camera.position;
    world.scene.set_position(root, eye + Vec3::Z * 10.0);
    assert!(world.shoot().unwrap().hit_enemy);

    let mut input = InputLatch::new();
    for _ in 0..12 {
        world.frame(DT, &mut input);
    }
    assert!(world.enemies.is_empty());
    assert!(!world.scene.contains(root));

    for _ in 0..(2.1 / DT) as usize {
        world.frame(DT, &mut input);
    }
    assert_eq!(world.enemies.len(), 1);
}

#[test]
fn session_runs_sixty_seconds() {
    let (mut world, _) = world_with(0);
    let mut input = InputLatch::new();
    world.activate();

    for _ in 0..(30.0 / DT) as usize {
        world.frame(DT, &mut input);
    }
    assert!(!world.is_frozen());
    assert!(world.hud_line().starts_with("Score: 0 | Time Left: 3"));

    let mut summary = None;
    for _ in 0..(31.0 / DT) as usize {
        summary = summary.or(world.frame(DT, &mut input));
    }
    assert!(world.is_frozen());
    assert_eq!(summary.map(|s| s.score), Some(0));
    assert_eq!(world.hud_line(), "Score: 0 | Time Left: 0s");
}
