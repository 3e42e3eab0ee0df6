use std::time::Duration;

/// Running counters for a simulation session.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepStats {
    /// Ticks that actually advanced (no-op ticks with a bad `dt` are not counted).
    pub ticks: u64,
    /// Bodies integrated during the most recent tick.
    pub bodies_integrated: usize,
    /// Wall contacts resolved during the most recent tick, one per axis.
    pub boundary_contacts: usize,
    /// Total wall contacts since the session started.
    pub total_boundary_contacts: u64,
    /// Wall-clock time spent in the most recent tick.
    pub last_step_time: Duration,
}

impl StepStats {
    pub(crate) fn record(&mut self, bodies: usize, contacts: usize, elapsed: Duration) {
        self.ticks += 1;
        self.bodies_integrated = bodies;
        self.boundary_contacts = contacts;
        self.total_boundary_contacts += contacts as u64;
        self.last_step_time = elapsed;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
