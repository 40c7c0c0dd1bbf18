// Use-case level inputs/outputs for the game loop.

use crate::domain::{BallSnapshot, InputDirection, PlayerId, PlayerSnapshot, Team, World};
use tokio::sync::oneshot;

use super::registry::SessionId;

#[derive(Debug)]
pub enum GameEvent {
    // The reply carries the assigned identity back to the connecting session.
    Join {
        session_id: SessionId,
        reply: oneshot::Sender<JoinAck>,
    },
    Leave {
        player_id: PlayerId,
    },
    Input {
        player_id: PlayerId,
        input: InputDirection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinAck {
    pub player_id: PlayerId,
    pub team: Team,
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub players: Vec<PlayerSnapshot>,
    pub balls: Vec<BallSnapshot>,
}

impl From<&World> for WorldUpdate {
    fn from(world: &World) -> Self {
        Self {
            players: world.players().map(PlayerSnapshot::from).collect(),
            balls: world.balls().iter().map(BallSnapshot::from).collect(),
        }
    }
}
