/// Gameplay tuning for the arena.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
/// Distances are world units; the field is centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaTuning {
    /// Full field width (x spans `-width/2..=width/2`).
    pub field_width: f32,

    /// Full field height (y spans `-height/2..=height/2`).
    pub field_height: f32,

    /// Player collision radius.
    pub player_radius: f32,

    /// Ball pickup radius.
    pub ball_radius: f32,

    /// Distance a player covers per tick at full input.
    pub player_speed: f32,

    /// Goal extent along the y axis, centered on y = 0.
    pub goal_width: f32,

    /// Goal extent along the x axis, measured from the owning edge.
    pub goal_depth: f32,

    /// Horizontal spawn distance from the team's own edge.
    pub spawn_inset: f32,

    /// Number of live balls; constant for the lifetime of the world.
    pub ball_count: usize,
}

impl ArenaTuning {
    pub fn half_width(&self) -> f32 {
        self.field_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.field_height / 2.0
    }

    /// Checks that the tuning describes a playable field.
    ///
    /// The simulation assumes these hold on every tick; run this once before a world is built.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_radius", self.player_radius),
            ("ball_radius", self.ball_radius),
            ("goal_width", self.goal_width),
            ("goal_depth", self.goal_depth),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a finite positive number, got {value}"));
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("spawn_inset", self.spawn_inset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a finite non-negative number, got {value}"));
            }
        }

        // Players are clamped to the field inset by their radius on both axes.
        let room = self.half_width().min(self.half_height());
        if self.player_radius >= room {
            return Err(format!(
                "player_radius {} must be smaller than half the field ({room})",
                self.player_radius
            ));
        }

        Ok(())
    }
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            field_width: 1000.0,
            field_height: 600.0,
            player_radius: 20.0,
            ball_radius: 10.0,
            player_speed: 5.0,
            goal_width: 200.0,
            goal_depth: 60.0,
            spawn_inset: 40.0,
            ball_count: 5,
        }
    }
}
