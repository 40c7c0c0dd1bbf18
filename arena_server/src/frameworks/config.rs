use crate::domain::ArenaTuning;
use crate::use_cases::ArenaSettings;
use std::{env, net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

// 30 Hz.
const DEFAULT_TICK_MS: u64 = 33;

// Reads `key`, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparsable config value");
                default
            }
        },
        Err(_) => default,
    }
}

pub fn http_port() -> u16 {
    env_or("ARENA_PORT", 3000)
}

pub fn bind_addr() -> IpAddr {
    env_or("ARENA_BIND_ADDR", IpAddr::from([127, 0, 0, 1]))
}

pub fn tick_interval() -> Duration {
    // A zero period would make tokio's interval panic.
    Duration::from_millis(env_or("ARENA_TICK_MS", DEFAULT_TICK_MS).max(1))
}

pub fn static_root() -> PathBuf {
    env::var("ARENA_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public"))
}

pub fn rng_seed() -> Option<u64> {
    env::var("ARENA_RNG_SEED")
        .ok()
        .and_then(|v| v.trim().parse().ok())
}

pub fn arena_tuning() -> ArenaTuning {
    let d = ArenaTuning::default();
    ArenaTuning {
        field_width: env_or("ARENA_FIELD_WIDTH", d.field_width),
        field_height: env_or("ARENA_FIELD_HEIGHT", d.field_height),
        player_radius: env_or("ARENA_PLAYER_RADIUS", d.player_radius),
        ball_radius: env_or("ARENA_BALL_RADIUS", d.ball_radius),
        player_speed: env_or("ARENA_PLAYER_SPEED", d.player_speed),
        goal_width: env_or("ARENA_GOAL_WIDTH", d.goal_width),
        goal_depth: env_or("ARENA_GOAL_DEPTH", d.goal_depth),
        spawn_inset: env_or("ARENA_SPAWN_INSET", d.spawn_inset),
        ball_count: env_or("ARENA_BALL_COUNT", d.ball_count),
    }
}

pub fn arena_settings() -> ArenaSettings {
    ArenaSettings {
        input_channel_capacity: INPUT_CHANNEL_CAPACITY,
        world_broadcast_capacity: WORLD_BROADCAST_CAPACITY,
        tick_interval: tick_interval(),
        tuning: arena_tuning(),
        rng_seed: rng_seed(),
    }
}
