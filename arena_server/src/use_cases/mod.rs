// Use cases layer: application workflows for the arena server.

pub mod arena;
pub mod game;
pub mod registry;
pub mod types;

pub use arena::{ArenaHandle, ArenaSettings};
pub use registry::{ConnectionRegistry, SessionId};
pub use types::{GameEvent, JoinAck, WorldUpdate};
