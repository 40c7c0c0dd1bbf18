// Per-tick simulation systems, applied by `World::step` in a fixed order.

pub mod collision;
pub mod movement;
pub mod possession;
