// Domain layer: core simulation types and rules.

pub mod entities;
pub mod geometry;
pub mod input;
pub mod state;
pub mod systems;
pub mod tuning;
pub mod world;

pub use input::InputDirection;
pub use state::{Ball, BallId, BallSnapshot, Player, PlayerId, PlayerSnapshot, Team};
pub use tuning::ArenaTuning;
pub use world::World;
