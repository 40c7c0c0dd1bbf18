use super::movement::find_ball;
use crate::domain::entities::new_ball;
use crate::domain::geometry::{distance_sq, in_goal};
use crate::domain::state::{Ball, BallId, Player, PlayerId};
use crate::domain::tuning::ArenaTuning;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Awards a point to every carrier standing in its own team's goal.
///
/// The scored ball is replaced in place by a freshly spawned one, so the pool size never
/// changes. Returns the number of goals scored this tick.
pub fn score_goals<R: Rng>(
    players: &mut BTreeMap<PlayerId, Player>,
    balls: &mut [Ball],
    next_ball_id: &mut BallId,
    tuning: &ArenaTuning,
    rng: &mut R,
) -> usize {
    let mut goals = 0;

    for p in players.values_mut() {
        let Some(ball_id) = p.carried_ball else {
            continue;
        };
        if !in_goal(p.team, p.x, p.y, tuning) {
            continue;
        }

        p.carried_ball = None;
        let Some(slot) = balls.iter_mut().find(|b| b.id == ball_id) else {
            // Ball already gone; nothing to score or replace.
            continue;
        };

        p.score += 1;
        *slot = new_ball(*next_ball_id, tuning, rng);
        *next_ball_id = next_ball_id.wrapping_add(1);
        goals += 1;

        info!(
            player_id = p.id,
            team = ?p.team,
            score = p.score,
            scored_ball_id = ball_id,
            new_ball_id = slot.id,
            "goal scored"
        );
    }

    goals
}

/// Gives each empty-handed player the first free ball within reach.
///
/// Players are visited in id order and balls in pool order, which keeps pickups
/// deterministic when several players contend for the same ball.
pub fn pick_up_balls(
    players: &mut BTreeMap<PlayerId, Player>,
    balls: &mut [Ball],
    tuning: &ArenaTuning,
) {
    let reach = tuning.player_radius + tuning.ball_radius;
    let reach_sq = reach * reach;

    for p in players.values_mut() {
        if p.carried_ball.is_some() {
            continue;
        }

        let Some(ball) = balls
            .iter_mut()
            .find(|b| b.carrier.is_none() && distance_sq(p.x, p.y, b.x, b.y) < reach_sq)
        else {
            continue;
        };

        ball.carrier = Some(p.id);
        p.carried_ball = Some(ball.id);
        debug!(player_id = p.id, ball_id = ball.id, "ball picked up");
    }
}

/// Clears both sides of the player's carry, if any.
pub fn drop_ball(p: &mut Player, balls: &mut [Ball]) {
    let Some(ball_id) = p.carried_ball.take() else {
        return;
    };

    if let Some(ball) = find_ball(balls, ball_id) {
        if ball.carrier == Some(p.id) {
            ball.carrier = None;
            debug!(player_id = p.id, ball_id, "ball dropped");
        }
    }
}
