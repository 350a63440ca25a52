pub mod camera;
pub mod combat;
pub mod constants;
pub mod enemy;
pub mod game_state;
pub mod hitscan;
pub mod menu;
pub mod physics;
pub mod player;
pub mod scene;
pub mod timers;
pub mod weapons;
pub mod world;

pub use player::Player;
pub use world::{ShotOutcome, World};
