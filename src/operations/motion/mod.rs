mod entity;
mod track;
mod train;

pub use entity::MovingEntity;
pub use track::{Placement, Track};
pub use train::{ConsistParams, Train};
