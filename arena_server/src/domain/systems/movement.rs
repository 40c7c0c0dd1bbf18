use crate::domain::geometry::clamp_to_field;
use crate::domain::state::{Ball, BallId, Player, PlayerId};
use crate::domain::tuning::ArenaTuning;
use std::collections::BTreeMap;

pub fn tick_player(p: &mut Player, tuning: &ArenaTuning) {
    if p.input.is_zero() {
        return;
    }

    // Unit direction so diagonals don't outrun straight movement.
    let (dir_x, dir_y) = p.input.normalized();

    let (x, y) = clamp_to_field(
        p.x + dir_x * tuning.player_speed,
        p.y + dir_y * tuning.player_speed,
        tuning.player_radius,
        tuning,
    );
    p.x = x;
    p.y = y;
}

/// Pins every carried ball to its carrier's position.
pub fn follow_carriers(players: &mut BTreeMap<PlayerId, Player>, balls: &mut [Ball]) {
    for p in players.values_mut() {
        let Some(ball_id) = p.carried_ball else {
            continue;
        };

        match find_ball(balls, ball_id) {
            Some(ball) if ball.carrier == Some(p.id) => {
                ball.x = p.x;
                ball.y = p.y;
            }
            // Dangling carry; clear our side and move on.
            _ => p.carried_ball = None,
        }
    }
}

pub(crate) fn find_ball(balls: &mut [Ball], id: BallId) -> Option<&mut Ball> {
    balls.iter_mut().find(|b| b.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::new_player;
    use crate::domain::input::InputDirection;
    use crate::domain::state::Team;

    #[test]
    fn idle_player_does_not_move() {
        let tuning = ArenaTuning::default();
        let mut p = new_player(1, Team::Left, &tuning);
        tick_player(&mut p, &tuning);
        assert_eq!((p.x, p.y), (-460.0, 0.0));
    }

    #[test]
    fn diagonal_step_matches_straight_step_length() {
        let tuning = ArenaTuning::default();
        let mut p = new_player(1, Team::Left, &tuning);
        p.x = 0.0;
        p.input = InputDirection { x: 1.0, y: 1.0 };
        tick_player(&mut p, &tuning);
        assert!((p.x.hypot(p.y) - tuning.player_speed).abs() < 1e-4);
    }

    #[test]
    fn movement_clamps_to_inset_field() {
        let tuning = ArenaTuning::default();
        let mut p = new_player(1, Team::Left, &tuning);
        p.input = InputDirection { x: -1.0, y: 0.0 };
        for _ in 0..100 {
            tick_player(&mut p, &tuning);
        }
        assert_eq!(p.x, -tuning.half_width() + tuning.player_radius);
    }

    #[test]
    fn dangling_carry_is_cleared() {
        let tuning = ArenaTuning::default();
        let mut players = BTreeMap::new();
        let mut p = new_player(1, Team::Left, &tuning);
        p.carried_ball = Some(99);
        players.insert(p.id, p);

        follow_carriers(&mut players, &mut []);
        assert!(players[&1].carried_ball.is_none());
    }
}
