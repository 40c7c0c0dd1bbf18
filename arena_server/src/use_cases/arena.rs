// Arena wiring: channels and the spawned world task.

use super::game::world_task;
use super::types::{GameEvent, WorldUpdate};
use crate::domain::{ArenaTuning, World};
use axum::extract::ws::Utf8Bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};

/// Configuration for spawning the arena world.
#[derive(Debug, Clone)]
pub struct ArenaSettings {
    /// Capacity for inbound player events.
    pub input_channel_capacity: usize,
    /// Capacity for broadcast world updates.
    pub world_broadcast_capacity: usize,
    /// Fixed tick interval for the game loop.
    pub tick_interval: Duration,
    /// Gameplay tuning for the field, players and balls.
    pub tuning: ArenaTuning,
    /// Fixed RNG seed for reproducible ball spawns; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

/// Channels connecting network sessions to the world task.
#[derive(Clone)]
pub struct ArenaHandle {
    /// Sender for game events into the world task.
    pub input_tx: mpsc::Sender<GameEvent>,
    /// Broadcast sender for raw world updates.
    pub world_tx: broadcast::Sender<WorldUpdate>,
    /// Broadcast sender for serialized world updates.
    pub world_bytes_tx: broadcast::Sender<Utf8Bytes>,
    /// Watch sender holding the latest serialized world update.
    pub world_latest_tx: watch::Sender<Utf8Bytes>,
}

impl ArenaHandle {
    /// Creates the channels and spawns the authoritative world loop.
    pub fn spawn(settings: &ArenaSettings) -> Self {
        let (input_tx, input_rx) = mpsc::channel::<GameEvent>(settings.input_channel_capacity);
        let (world_tx, _world_rx) =
            broadcast::channel::<WorldUpdate>(settings.world_broadcast_capacity);
        let (world_bytes_tx, _world_bytes_rx) =
            broadcast::channel::<Utf8Bytes>(settings.world_broadcast_capacity);
        let (world_latest_tx, _world_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));

        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let world = World::new(settings.tuning, rng);

        tokio::spawn(world_task(
            input_rx,
            world_tx.clone(),
            world,
            settings.tick_interval,
        ));

        Self {
            input_tx,
            world_tx,
            world_bytes_tx,
            world_latest_tx,
        }
    }
}
