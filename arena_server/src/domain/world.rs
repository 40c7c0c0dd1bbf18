// Authoritative arena state and the fixed-order tick that advances it.

use super::entities::{new_ball, new_player};
use super::input::InputDirection;
use super::state::{Ball, BallId, Player, PlayerId, Team};
use super::systems::{collision, movement, possession};
use super::tuning::ArenaTuning;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

/// Counts of notable events from a single tick, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub goals: usize,
    pub collisions: usize,
}

/// Every player and ball in the arena.
///
/// Owned by exactly one task; systems borrow it for the duration of a tick.
pub struct World {
    tuning: ArenaTuning,
    // Ordered by id so every per-tick scan is deterministic.
    players: BTreeMap<PlayerId, Player>,
    balls: Vec<Ball>,
    next_ball_id: BallId,
    rng: StdRng,
    tick: u64,
}

impl World {
    /// Creates the arena with its full ball pool already spawned.
    pub fn new(tuning: ArenaTuning, mut rng: StdRng) -> Self {
        let balls: Vec<Ball> = (1..=tuning.ball_count as BallId)
            .map(|id| new_ball(id, &tuning, &mut rng))
            .collect();
        let next_ball_id = balls.len() as BallId + 1;

        Self {
            tuning,
            players: BTreeMap::new(),
            balls,
            next_ball_id,
            rng,
            tick: 0,
        }
    }

    pub fn tuning(&self) -> &ArenaTuning {
        &self.tuning
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Spawns a player at its team's edge. An existing player with the same id is replaced.
    pub fn spawn_player(&mut self, id: PlayerId, team: Team) -> &Player {
        self.remove_player(id);
        self.players
            .entry(id)
            .or_insert_with(|| new_player(id, team, &self.tuning))
    }

    /// Removes a player and frees any ball it was carrying.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let mut player = self.players.remove(&id)?;
        possession::drop_ball(&mut player, &mut self.balls);
        Some(player)
    }

    /// Stores the latest input for a player. Returns false for unknown ids.
    pub fn set_input(&mut self, id: PlayerId, input: InputDirection) -> bool {
        match self.players.get_mut(&id) {
            Some(p) => {
                p.input = input;
                true
            }
            None => false,
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> TickReport {
        let Self {
            tuning,
            players,
            balls,
            next_ball_id,
            rng,
            tick,
        } = self;

        for p in players.values_mut() {
            movement::tick_player(p, tuning);
        }
        movement::follow_carriers(players, balls);
        let goals = possession::score_goals(players, balls, next_ball_id, tuning, rng);
        possession::pick_up_balls(players, balls, tuning);
        let collisions = collision::resolve_player_collisions(players, balls, tuning);

        *tick += 1;
        TickReport { goals, collisions }
    }
}
