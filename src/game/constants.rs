// Movement (shared by the player and enemies)
pub const GRAVITY: f32 = -15.0;
pub const WALK_SPEED: f32 = 10.0;
pub const SPRINT_SPEED: f32 = 20.0;
pub const JUMP_FORCE: f32 = 8.0;
pub const GROUND_PROBE_LENGTH: f32 = 1.1;
pub const GROUND_NAME: &str = "ground";
pub const WALL_PREFIX: &str = "wall";

// Arena
pub const ARENA_SIZE: f32 = 100.0;
pub const WALL_HEIGHT: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 1.0;

// Player
pub const PLAYER_NAME: &str = "player";
pub const PLAYER_HEIGHT: f32 = 2.0;
pub const PLAYER_RADIUS: f32 = 0.4;
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 3.0, 0.0];
pub const CAMERA_EYE_OFFSET: f32 = 1.0;
pub const TELEPORT_DISTANCE: f32 = 12.0;
pub const TELEPORT_LIFT: f32 = 2.0;
pub const DAMAGE_FLASH_SECS: f32 = 0.3;
pub const DAMAGE_COOLDOWN_SECS: f32 = 0.5;

// Enemies
pub const MAX_ENEMIES: u32 = 20;
pub const DEFAULT_ENEMY_COUNT: u32 = 10;
pub const ENEMY_HEIGHT: f32 = 1.5;
pub const ENEMY_RADIUS: f32 = 0.4;
pub const ENEMY_SPAWN_HALF_RANGE: f32 = 30.0;
pub const ENEMY_SPAWN_MIN_HEIGHT: f32 = 1.0;
pub const ENEMY_SPAWN_HEIGHT_SPREAD: f32 = 5.0;
pub const ENEMY_TURN_CHANCE: f64 = 0.005;
pub const ENEMY_SPRINT_CHANCE: f64 = 0.2;
pub const ENEMY_SPRINT_SECS: f32 = 2.0;
pub const ENEMY_JUMP_CHANCE: f64 = 0.02;
pub const ENEMY_JUMP_COOLDOWN_SECS: f32 = 1.5;
pub const ENEMY_SHOOT_COOLDOWN_MIN: f32 = 1.5;
pub const ENEMY_SHOOT_COOLDOWN_MAX: f32 = 3.5;
pub const ENEMY_MUZZLE_HEIGHT: f32 = 0.5;
pub const ENEMY_REMOVE_DELAY_SECS: f32 = 0.1;
pub const ENEMY_RESPAWN_DELAY_SECS: f32 = 2.0;

// Enemy projectiles
pub const PROJECTILE_SPEED: f32 = 18.0;
pub const PROJECTILE_LIFETIME_SECS: f32 = 5.0;
pub const PROJECTILE_RADIUS: f32 = 0.15;
pub const PROJECTILE_MAX_DISTANCE: f32 = 100.0;
pub const PROJECTILE_HIT_PENALTY: u32 = 5;

// Player weapon
pub const SHOT_RANGE: f32 = 100.0;
pub const SHOT_MUZZLE_OFFSET: f32 = 0.5;
pub const SHOT_SCORE: u32 = 10;
pub const BEAM_LIFETIME_SECS: f32 = 0.3;
pub const BEAM_FADE_RATE: f32 = 2.5;
pub const IMPACT_LIFETIME_SECS: f32 = 0.2;
pub const IMPACT_FADE_RATE: f32 = 5.0;

// Session
pub const SESSION_SECS: u32 = 60;
