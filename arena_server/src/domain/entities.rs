// Entity factory: canonical spawn rules for players and balls.

use super::input::InputDirection;
use super::state::{Ball, BallId, Player, PlayerId, Team};
use super::tuning::ArenaTuning;
use rand::Rng;

/// A fresh ball at a uniformly random point of the full field.
pub fn new_ball<R: Rng>(id: BallId, tuning: &ArenaTuning, rng: &mut R) -> Ball {
    let half_w = tuning.half_width();
    let half_h = tuning.half_height();
    Ball {
        id,
        x: rng.random_range(-half_w..=half_w),
        y: rng.random_range(-half_h..=half_h),
        carrier: None,
    }
}

/// A fresh player near its own edge, vertically centered.
pub fn new_player(id: PlayerId, team: Team, tuning: &ArenaTuning) -> Player {
    let x = match team {
        Team::Left => -tuning.half_width() + tuning.spawn_inset,
        Team::Right => tuning.half_width() - tuning.spawn_inset,
    };
    Player {
        id,
        team,
        x,
        y: 0.0,
        score: 0,
        input: InputDirection::ZERO,
        carried_ball: None,
    }
}
