//! Global configuration constants and session settings for the Physix sandbox.

use serde::{Deserialize, Serialize};

/// Default gravity vector (screen space, Y-down).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 9.81];

/// Default integration timestep (in seconds) used by [`crate::Simulator::advance`].
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Default fraction of normal velocity retained after a wall bounce.
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Upper bound on fixed ticks run by a single `advance` call.
pub const DEFAULT_MAX_STEPS_PER_ADVANCE: u32 = 8;

/// Speeds below this are treated as rest when computing drag.
pub const MIN_SPEED: f32 = 1e-6;

/// Tunables for a simulation session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick length for the `advance` accumulator.
    pub time_step: f32,
    /// Wall restitution `e` in `[0, 1]`: 0 sticks, 1 is a perfectly elastic bounce.
    pub restitution: f32,
    /// Ticks beyond this per `advance` call are dropped.
    pub max_steps_per_advance: u32,
    /// Integrate bodies with rayon when the `parallel` feature is compiled in.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            restitution: DEFAULT_RESTITUTION,
            max_steps_per_advance: DEFAULT_MAX_STEPS_PER_ADVANCE,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    /// Returns a copy with out-of-range values pulled back to usable ones.
    pub fn sanitized(mut self) -> Self {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            self.time_step = DEFAULT_TIME_STEP;
        }
        self.restitution = sanitize_restitution(self.restitution);
        self.max_steps_per_advance = self.max_steps_per_advance.max(1);
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = sanitize_restitution(restitution);
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self.sanitized()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

pub(crate) fn sanitize_restitution(value: f32) -> f32 {
    if value.is_nan() {
        DEFAULT_RESTITUTION
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_restores_defaults_for_bad_values() {
        let config = SimulationConfig {
            time_step: -1.0,
            restitution: 3.0,
            max_steps_per_advance: 0,
            parallel: false,
        }
        .sanitized();

        assert_eq!(config.time_step, DEFAULT_TIME_STEP);
        assert_eq!(config.restitution, 1.0);
        assert_eq!(config.max_steps_per_advance, 1);
    }

    #[test]
    fn restitution_is_clamped_into_unit_range() {
        assert_eq!(SimulationConfig::default().with_restitution(-0.5).restitution, 0.0);
        assert_eq!(SimulationConfig::default().with_restitution(0.25).restitution, 0.25);
        assert_eq!(
            SimulationConfig::default().with_restitution(f32::NAN).restitution,
            DEFAULT_RESTITUTION
        );
    }
}
