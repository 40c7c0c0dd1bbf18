// Connection registry: session <-> player bookkeeping and team rotation.

use super::types::JoinAck;
use crate::domain::{InputDirection, PlayerId, Team, World};
use std::collections::HashMap;
use tracing::{debug, info};

pub type SessionId = u64;

/// Maps live sessions to the players they control.
///
/// Only the world task touches this, so the join counter needs no synchronization.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    // Monotonic across the server lifetime; drives both player ids and team rotation.
    joins: u64,
    sessions: HashMap<PlayerId, SessionId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session, spawns its player and returns the handshake data.
    ///
    /// Teams alternate Left, Right, Left, ... by join order regardless of who is still
    /// connected.
    pub fn on_connect(&mut self, world: &mut World, session_id: SessionId) -> JoinAck {
        let team = if self.joins % 2 == 0 {
            Team::Left
        } else {
            Team::Right
        };
        self.joins += 1;
        let player_id = self.joins;

        world.spawn_player(player_id, team);
        self.sessions.insert(player_id, session_id);
        info!(player_id, session_id, team = ?team, "player joined");

        JoinAck { player_id, team }
    }

    /// Drops the session and its player. Unknown ids are ignored.
    pub fn on_disconnect(&mut self, world: &mut World, player_id: PlayerId) -> bool {
        let had_session = self.sessions.remove(&player_id).is_some();
        let removed = world.remove_player(player_id);

        match removed {
            Some(player) => {
                info!(player_id, score = player.score, "player left");
                true
            }
            None => {
                if had_session {
                    debug!(player_id, "session removed without a live player");
                }
                false
            }
        }
    }

    /// Stores validated input for a connected player. Returns false for unknown ids.
    pub fn on_input(&self, world: &mut World, player_id: PlayerId, input: InputDirection) -> bool {
        if !self.sessions.contains_key(&player_id) {
            return false;
        }
        world.set_input(player_id, input)
    }

    pub fn session_of(&self, player_id: PlayerId) -> Option<SessionId> {
        self.sessions.get(&player_id).copied()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
