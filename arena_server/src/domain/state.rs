// Domain-level simulation entities and snapshot types.

use super::input::InputDirection;

pub type PlayerId = u64;
pub type BallId = u64;

/// Side of the field a player belongs to. Fixed for the player's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Left,
    Right,
}

impl Team {
    /// The team assigned after this one in the join rotation.
    pub fn next(self) -> Self {
        match self {
            Team::Left => Team::Right,
            Team::Right => Team::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    pub score: u32,

    // Simulation-only state (do not serialize to clients)
    pub input: InputDirection, // last received input, applied on the next tick
    pub carried_ball: Option<BallId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub x: f32,
    pub y: f32,
    pub carrier: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallSnapshot {
    pub id: BallId,
    pub x: f32,
    pub y: f32,
    pub carried_by: Option<PlayerId>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            team: p.team,
            x: p.x,
            y: p.y,
            score: p.score,
        }
    }
}

impl From<&Ball> for BallSnapshot {
    fn from(b: &Ball) -> Self {
        Self {
            id: b.id,
            x: b.x,
            y: b.y,
            carried_by: b.carrier,
        }
    }
}
