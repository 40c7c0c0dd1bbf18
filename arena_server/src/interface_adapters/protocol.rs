// Wire protocol DTOs and conversions for the arena WebSocket.
// The union is closed: anything that does not parse into `ClientMessage` is dropped.

use crate::domain::{BallSnapshot, PlayerSnapshot, Team};
use crate::use_cases::{JoinAck, WorldUpdate};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    // Assigned identity for the connection, sent once before any state.
    Init(InitDto),
    // Full snapshot of the arena for one tick.
    State(WorldStateDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    // Desired movement direction; clamped server-side.
    Input(InputDto),
}

/// Raw direction payload. Both components are required.
///
/// Kept at `f64` so JSON numbers outside the `f32` range survive until clamping.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InputDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamDto {
    Left,
    Right,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        match team {
            Team::Left => TeamDto::Left,
            Team::Right => TeamDto::Right,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InitDto {
    pub id: String,
    pub team: TeamDto,
}

impl From<JoinAck> for InitDto {
    fn from(ack: JoinAck) -> Self {
        Self {
            id: ack.player_id.to_string(),
            team: ack.team.into(),
        }
    }
}

/// Snapshot of the arena sent to clients on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldStateDto {
    pub players: Vec<PlayerStateDto>,
    pub balls: Vec<BallStateDto>,
}

impl From<WorldUpdate> for WorldStateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            players: update.players.iter().map(PlayerStateDto::from).collect(),
            balls: update.balls.iter().map(BallStateDto::from).collect(),
        }
    }
}

/// Flattened player state for wire transmission.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    pub id: String,
    pub team: TeamDto,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(player: &PlayerSnapshot) -> Self {
        Self {
            id: player.id.to_string(),
            team: player.team.into(),
            x: player.x,
            y: player.y,
            score: player.score,
        }
    }
}

/// Flattened ball state for wire transmission.
#[derive(Debug, Clone, Serialize)]
pub struct BallStateDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "carriedBy")]
    pub carried_by: Option<String>,
}

impl From<&BallSnapshot> for BallStateDto {
    fn from(ball: &BallSnapshot) -> Self {
        Self {
            id: ball.id.to_string(),
            x: ball.x,
            y: ball.y,
            carried_by: ball.carried_by.map(|id| id.to_string()),
        }
    }
}
