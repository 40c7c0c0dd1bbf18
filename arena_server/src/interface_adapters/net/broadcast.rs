// State broadcaster: serialize each snapshot once, share the bytes with every session.

use crate::interface_adapters::protocol::{ServerMessage, WorldStateDto};
use crate::use_cases::{ArenaHandle, WorldUpdate};
use axum::extract::ws::Utf8Bytes;
use tokio::sync::{broadcast, watch};
use tracing::{error, warn};

pub async fn world_update_serializer(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    world_bytes_tx: broadcast::Sender<Utf8Bytes>,
    world_latest_tx: watch::Sender<Utf8Bytes>,
) {
    loop {
        match world_rx.recv().await {
            Ok(update) => {
                let Some(bytes) = encode_world_update(update) else {
                    continue;
                };

                // Store the latest bytes for lag recovery.
                let _ = world_latest_tx.send(bytes.clone());
                // Sessions pull from their own receivers; this never waits on a socket.
                let _ = world_bytes_tx.send(bytes);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(
                    missed = n,
                    "world serializer lagged; skipping to latest update"
                );
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!("world updates channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub fn spawn_world_serializer(arena: &ArenaHandle) {
    tokio::spawn(world_update_serializer(
        arena.world_tx.subscribe(),
        arena.world_bytes_tx.clone(),
        arena.world_latest_tx.clone(),
    ));
}

fn encode_world_update(update: WorldUpdate) -> Option<Utf8Bytes> {
    let msg = ServerMessage::State(WorldStateDto::from(update));
    match serde_json::to_string(&msg) {
        Ok(txt) => Some(Utf8Bytes::from(txt)),
        Err(e) => {
            error!(error = ?e, "failed to serialize world update");
            None
        }
    }
}
