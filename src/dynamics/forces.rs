use glam::Vec2;

use crate::core::{body::Body, environment::Environment};
use crate::utils::math::clamp_length_to;

/// Persistent force source evaluated for every placed body on every tick.
///
/// Gravity and zone drag are built into the step; generators cover anything
/// else a host wants applied continuously, such as wind.
pub trait ForceGenerator: Send + Sync {
    fn force(&self, body: &Body, environment: &Environment) -> Vec2;
}

/// The same force on every body, regardless of mass.
pub struct ConstantForce {
    pub force: Vec2,
}

impl ForceGenerator for ConstantForce {
    fn force(&self, _body: &Body, _environment: &Environment) -> Vec2 {
        self.force
    }
}

/// Collection of generators summed into each body's per-tick force.
#[derive(Default)]
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn clear(&mut self) {
        self.forces.clear();
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn total(&self, body: &Body, environment: &Environment) -> Vec2 {
        self.forces
            .iter()
            .map(|generator| generator.force(body, environment))
            .sum()
    }
}

/// Weight of a body: `mass * g`.
pub fn gravity_force(mass: f32, gravity: Vec2) -> Vec2 {
    gravity * mass
}

/// Limits drag so its impulse over `dt` never exceeds the body's momentum.
///
/// The direction is kept; only the magnitude shrinks. Drag alone can therefore
/// bring a body to rest within a tick but never flip its direction.
pub fn clamp_drag_force(drag: Vec2, momentum: Vec2, dt: f32) -> Vec2 {
    if !(dt.is_finite() && dt > 0.0) {
        return Vec2::ZERO;
    }
    clamp_length_to(drag * dt, momentum.length()) / dt
}

/// Total force acting on `body` this tick. Consumes the body's queued force.
pub fn accumulate_forces(
    body: &mut Body,
    environment: &Environment,
    registry: &ForceRegistry,
    dt: f32,
) -> Vec2 {
    let queued = body.take_force();
    let drag = environment.drag_at(body.position(), body.velocity());
    let drag = clamp_drag_force(drag, body.momentum(), dt);

    gravity_force(body.mass(), environment.gravity())
        + queued
        + registry.total(body, environment)
        + drag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::zone::ResistanceZone;

    fn arena(gravity: Vec2) -> Environment {
        Environment::new(gravity, Vec2::ZERO, Vec2::new(100.0, 100.0)).expect("valid bounds")
    }

    #[test]
    fn drag_within_momentum_is_unchanged() {
        let drag = Vec2::new(0.0, -2.0);
        let clamped = clamp_drag_force(drag, Vec2::new(0.0, 10.0), 1.0);
        assert_eq!(clamped, drag);
    }

    #[test]
    fn oversized_drag_is_capped_at_momentum() {
        let clamped = clamp_drag_force(Vec2::new(0.0, -500.0), Vec2::new(0.0, 10.0), 0.5);
        assert!((clamped * 0.5 - Vec2::new(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn accumulation_sums_gravity_queue_and_generators() {
        let env = arena(Vec2::new(0.0, 10.0));
        let mut body = Body::new(&env, 2.0, 5.0).expect("fits");
        body.place(&env, Vec2::new(50.0, 50.0)).expect("inside");
        body.apply_force(Vec2::new(3.0, 0.0));

        let mut registry = ForceRegistry::new();
        registry.add_force(ConstantForce {
            force: Vec2::new(1.0, -1.0),
        });

        let total = accumulate_forces(&mut body, &env, &registry, 0.1);
        assert!((total - Vec2::new(4.0, 19.0)).length() < 1e-5);
        assert_eq!(body.pending_force(), Vec2::ZERO);
    }

    #[test]
    fn drag_only_applies_inside_zones() {
        let mut env = arena(Vec2::new(0.0, 1.0));
        env.add_zone(
            ResistanceZone::rect(Vec2::new(0.0, 60.0), Vec2::new(100.0, 100.0), 0.1)
                .expect("valid zone"),
        );
        let registry = ForceRegistry::new();

        let mut outside = Body::new(&env, 1.0, 5.0).expect("fits");
        outside.place(&env, Vec2::new(50.0, 20.0)).expect("inside");
        outside.apply_impulse(Vec2::new(0.0, 10.0));
        let total = accumulate_forces(&mut outside, &env, &registry, 0.1);
        assert!((total - Vec2::new(0.0, 1.0)).length() < 1e-5);

        let mut inside = Body::new(&env, 1.0, 5.0).expect("fits");
        inside.place(&env, Vec2::new(50.0, 80.0)).expect("inside");
        inside.apply_impulse(Vec2::new(0.0, 10.0));
        let total = accumulate_forces(&mut inside, &env, &registry, 0.1);
        assert!((total - Vec2::new(0.0, 1.0 - 10.0)).length() < 1e-4);
    }
}
