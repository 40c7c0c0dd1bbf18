// Input gateway: the only path from network input into simulation state.

/// Movement intent for one player, each component in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputDirection {
    pub x: f32,
    pub y: f32,
}

impl InputDirection {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Clamps each component independently to `[-1, 1]`.
    ///
    /// Takes wire-width floats and narrows only after clamping, so finite values beyond the
    /// `f32` range still saturate to the unit bounds. Returns `None` when either component is
    /// NaN or infinite so callers can drop the input.
    pub fn clamped(x: f64, y: f64) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(Self {
            x: x.clamp(-1.0, 1.0) as f32,
            y: y.clamp(-1.0, 1.0) as f32,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit-length version of this direction, or zero when there is no input.
    pub fn normalized(&self) -> (f32, f32) {
        let len = self.x.hypot(self.y);
        if len == 0.0 {
            return (0.0, 0.0);
        }
        (self.x / len, self.y / len)
    }
}
