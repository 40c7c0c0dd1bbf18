// Network adapter modules: snapshot fan-out and per-client WebSocket sessions.

pub mod broadcast;
pub mod client;

pub use broadcast::{spawn_world_serializer, world_update_serializer};
pub use client::ws_handler;
