use super::registry::ConnectionRegistry;
use super::types::{GameEvent, WorldUpdate};
use crate::domain::World;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// The single authoritative game loop.
///
/// Owns the world and the connection registry; every mutation of gameplay state happens
/// here, one tick at a time. Exits once every event sender has been dropped.
pub async fn world_task(
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    mut world: World,
    tick_interval: Duration,
) {
    let mut registry = ConnectionRegistry::new();

    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);

    info!(
        tick_ms = tick_interval.as_millis() as u64,
        balls = world.balls().len(),
        "world task started"
    );

    loop {
        interval.tick().await;

        // Apply everything that arrived since the last tick, in arrival order.
        loop {
            match input_rx.try_recv() {
                Ok(ev) => apply_event(&mut registry, &mut world, ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!(tick = world.tick(), "event channel closed; world task exiting");
                    return;
                }
            }
        }

        let report = world.step();
        if report.collisions > 0 {
            debug!(tick = world.tick(), collisions = report.collisions, "collisions resolved");
        }

        // No subscribers is fine; nobody is connected yet.
        let _ = world_tx.send(WorldUpdate::from(&world));
    }
}

fn apply_event(registry: &mut ConnectionRegistry, world: &mut World, ev: GameEvent) {
    match ev {
        GameEvent::Join { session_id, reply } => {
            let ack = registry.on_connect(world, session_id);
            if reply.send(ack).is_err() {
                // Session went away while queued; undo the spawn.
                warn!(player_id = ack.player_id, "joining session vanished before ack");
                registry.on_disconnect(world, ack.player_id);
            }
            debug!(connected = registry.len(), "registry updated");
        }
        GameEvent::Leave { player_id } => {
            let session_id = registry.session_of(player_id);
            if registry.on_disconnect(world, player_id) {
                debug!(player_id, ?session_id, connected = registry.len(), "registry updated");
                if registry.is_empty() {
                    info!(tick = world.tick(), "arena empty");
                }
            }
        }
        GameEvent::Input { player_id, input } => {
            registry.on_input(world, player_id, input);
        }
    }
}
