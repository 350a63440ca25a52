pub mod audio;
pub mod error;
pub mod input;
pub mod game;

pub mod app;
pub mod game_loop;
pub mod console;
pub mod logging;
pub mod resource_path;
pub mod settings;

pub use error::{Error, Result};
