// Pure geometry helpers for the arena field.

use super::state::Team;
use super::tuning::ArenaTuning;

pub fn distance_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

/// Clamps a point into the field rectangle shrunk by `inset` on every side.
pub fn clamp_to_field(x: f32, y: f32, inset: f32, tuning: &ArenaTuning) -> (f32, f32) {
    let max_x = tuning.half_width() - inset;
    let max_y = tuning.half_height() - inset;
    (x.clamp(-max_x, max_x), y.clamp(-max_y, max_y))
}

/// True when the point lies inside the goal zone owned by `team`.
///
/// Left owns the goal on the left edge, Right the one on the right edge.
pub fn in_goal(team: Team, x: f32, y: f32, tuning: &ArenaTuning) -> bool {
    let from_edge = match team {
        Team::Left => x + tuning.half_width(),
        Team::Right => tuning.half_width() - x,
    };
    from_edge < tuning.goal_depth && y.abs() < tuning.goal_width / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq_avoids_the_root() {
        assert_eq!(distance_sq(0.0, 0.0, 3.0, 4.0), 25.0);
        assert_eq!(distance_sq(-1.0, -1.0, -1.0, -1.0), 0.0);
    }

    #[test]
    fn clamp_respects_inset() {
        let tuning = ArenaTuning::default();
        let (x, y) = clamp_to_field(10_000.0, -10_000.0, 20.0, &tuning);
        assert_eq!(x, 480.0);
        assert_eq!(y, -280.0);

        let (x, y) = clamp_to_field(12.0, 34.0, 20.0, &tuning);
        assert_eq!((x, y), (12.0, 34.0));
    }

    #[test]
    fn goals_belong_to_their_own_side() {
        let tuning = ArenaTuning::default();
        assert!(in_goal(Team::Left, -480.0, 0.0, &tuning));
        assert!(!in_goal(Team::Right, -480.0, 0.0, &tuning));
        assert!(in_goal(Team::Right, 480.0, 50.0, &tuning));
        assert!(!in_goal(Team::Left, 480.0, 50.0, &tuning));
    }

    #[test]
    fn goal_bounds_are_exclusive() {
        let tuning = ArenaTuning::default();
        // Depth 60 from the left edge at -500.
        assert!(in_goal(Team::Left, -440.5, 0.0, &tuning));
        assert!(!in_goal(Team::Left, -440.0, 0.0, &tuning));
        // Half width 100 around the midline.
        assert!(in_goal(Team::Left, -480.0, 99.0, &tuning));
        assert!(!in_goal(Team::Left, -480.0, 100.0, &tuning));
        assert!(!in_goal(Team::Left, -480.0, -100.0, &tuning));
    }
}
