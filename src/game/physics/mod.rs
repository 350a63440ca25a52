pub mod collision;
pub mod pmove;

pub use collision::{Aabb, Ray};
