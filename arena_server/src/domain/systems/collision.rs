use super::possession::drop_ball;
use crate::domain::geometry::{clamp_to_field, distance_sq};
use crate::domain::state::{Ball, Player, PlayerId};
use crate::domain::tuning::ArenaTuning;
use std::collections::BTreeMap;
use tracing::debug;

/// Pushes overlapping players apart and knocks the ball out of both.
///
/// Pairs are visited in ascending id order (naive O(N^2) for now). Returns the number of
/// collisions resolved this tick.
pub fn resolve_player_collisions(
    players: &mut BTreeMap<PlayerId, Player>,
    balls: &mut [Ball],
    tuning: &ArenaTuning,
) -> usize {
    let mut ordered: Vec<&mut Player> = players.values_mut().collect();
    let mut collisions = 0;

    for i in 0..ordered.len() {
        let (head, tail) = ordered.split_at_mut(i + 1);
        let a = &mut *head[i];
        for b in tail.iter_mut() {
            let b = &mut **b;
            if !separate(a, b, tuning) {
                continue;
            }

            drop_ball(a, balls);
            drop_ball(b, balls);
            collisions += 1;
            debug!(player_a = a.id, player_b = b.id, "players collided");
        }
    }

    collisions
}

// Returns true when the pair overlapped and was separated.
fn separate(a: &mut Player, b: &mut Player, tuning: &ArenaTuning) -> bool {
    let min_dist = tuning.player_radius * 2.0;
    let dist_sq = distance_sq(a.x, a.y, b.x, b.y);
    if dist_sq >= min_dist * min_dist {
        return false;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers have no line between them; split along +x.
    let (nx, ny) = if dist > 0.0 {
        ((b.x - a.x) / dist, (b.y - a.y) / dist)
    } else {
        (1.0, 0.0)
    };
    let push = (min_dist - dist) / 2.0;

    (a.x, a.y) = clamp_to_field(a.x - nx * push, a.y - ny * push, tuning.player_radius, tuning);
    (b.x, b.y) = clamp_to_field(b.x + nx * push, b.y + ny * push, tuning.player_radius, tuning);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::new_player;
    use crate::domain::state::Team;

    fn pair(ax: f32, bx: f32) -> BTreeMap<PlayerId, Player> {
        let tuning = ArenaTuning::default();
        let mut a = new_player(1, Team::Left, &tuning);
        let mut b = new_player(2, Team::Right, &tuning);
        (a.x, a.y) = (ax, 10.0);
        (b.x, b.y) = (bx, 10.0);
        [(1, a), (2, b)].into_iter().collect()
    }

    #[test]
    fn overlapping_players_end_exactly_two_radii_apart() {
        let tuning = ArenaTuning::default();
        let mut players = pair(0.0, 30.0);

        let n = resolve_player_collisions(&mut players, &mut [], &tuning);

        assert_eq!(n, 1);
        let (a, b) = (&players[&1], &players[&2]);
        assert!(((b.x - a.x) - 40.0).abs() < 1e-4);
        // Symmetric: the midpoint stays put.
        assert!(((a.x + b.x) / 2.0 - 15.0).abs() < 1e-4);
        assert_eq!((a.y, b.y), (10.0, 10.0));
    }

    #[test]
    fn coincident_players_still_separate() {
        let tuning = ArenaTuning::default();
        let mut players = pair(0.0, 0.0);

        resolve_player_collisions(&mut players, &mut [], &tuning);

        let (a, b) = (&players[&1], &players[&2]);
        assert_eq!(a.x, -20.0);
        assert_eq!(b.x, 20.0);
    }

    #[test]
    fn distant_players_are_untouched() {
        let tuning = ArenaTuning::default();
        let mut players = pair(0.0, 40.0);

        assert_eq!(resolve_player_collisions(&mut players, &mut [], &tuning), 0);
        assert_eq!(players[&1].x, 0.0);
        assert_eq!(players[&2].x, 40.0);
    }

    #[test]
    fn collision_knocks_the_ball_loose() {
        let tuning = ArenaTuning::default();
        let mut players = pair(0.0, 10.0);
        players.get_mut(&1).expect("player 1").carried_ball = Some(7);
        let mut balls = vec![Ball {
            id: 7,
            x: 0.0,
            y: 10.0,
            carrier: Some(1),
        }];

        resolve_player_collisions(&mut players, &mut balls, &tuning);

        assert!(players[&1].carried_ball.is_none());
        assert!(players[&2].carried_ball.is_none());
        assert!(balls[0].carrier.is_none());
    }
}
