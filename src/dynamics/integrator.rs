use glam::Vec2;

use super::forces::{accumulate_forces, ForceRegistry};
use crate::collision::boundary::{resolve_boundary, BoundaryContact};
use crate::config::{sanitize_restitution, DEFAULT_RESTITUTION};
use crate::core::{body::Body, environment::Environment};
use crate::utils::math::{zero_non_finite, Point};

/// Result of advancing one body by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub position: Point,
    pub contact: BoundaryContact,
}

/// Semi-implicit Euler integrator with wall restitution.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    restitution: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DEFAULT_RESTITUTION)
    }
}

impl Integrator {
    pub fn new(restitution: f32) -> Self {
        Self {
            restitution: sanitize_restitution(restitution),
        }
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = sanitize_restitution(restitution);
    }

    /// `v += F/m * dt`, then `p += v * dt`, using the updated velocity.
    pub fn integrate(&self, body: &mut Body, force: Vec2, dt: f32) {
        body.velocity += force / body.mass() * dt;
        body.position += body.velocity * dt;
    }

    /// Advances one placed body: forces, integration, then wall resolution.
    ///
    /// Unplaced bodies and non-positive or non-finite `dt` leave the body untouched.
    pub fn step_body(
        &self,
        body: &mut Body,
        environment: &Environment,
        registry: &ForceRegistry,
        dt: f32,
    ) -> StepOutcome {
        if !body.is_placed() || !(dt.is_finite() && dt > 0.0) {
            return StepOutcome {
                position: body.position(),
                contact: BoundaryContact::default(),
            };
        }

        let force = accumulate_forces(body, environment, registry, dt);
        self.integrate(body, force, dt);
        // Overflowed components would turn into NaN on a zero-restitution bounce.
        body.velocity = zero_non_finite(body.velocity);

        let radius = body.radius();
        let contact = resolve_boundary(
            &mut body.position,
            &mut body.velocity,
            radius,
            &environment.bounds(),
            self.restitution,
        );

        StepOutcome {
            position: body.position,
            contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::zone::ResistanceZone;

    fn arena(gravity: Vec2) -> Environment {
        Environment::new(gravity, Vec2::ZERO, Vec2::new(100.0, 100.0)).expect("valid bounds")
    }

    #[test]
    fn falls_with_semi_implicit_euler() {
        let env = arena(Vec2::new(0.0, 9.8));
        let mut body = Body::new(&env, 1.0, 5.0).expect("fits");
        body.place(&env, Vec2::new(50.0, 50.0)).expect("inside");

        let outcome = Integrator::new(1.0).step_body(&mut body, &env, &ForceRegistry::new(), 1.0);

        assert!((body.velocity() - Vec2::new(0.0, 9.8)).length() < 1e-4);
        assert!((outcome.position - Vec2::new(50.0, 59.8)).length() < 1e-4);
        assert!(!outcome.contact.any());
    }

    #[test]
    fn unplaced_bodies_do_not_move() {
        let env = arena(Vec2::new(0.0, 9.8));
        let mut body = Body::new(&env, 1.0, 5.0).expect("fits");
        let outcome = Integrator::default().step_body(&mut body, &env, &ForceRegistry::new(), 1.0);
        assert_eq!(outcome.position, Vec2::ZERO);
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn non_positive_dt_is_a_no_op() {
        let env = arena(Vec2::new(0.0, 9.8));
        let mut body = Body::new(&env, 1.0, 5.0).expect("fits");
        body.place(&env, Vec2::new(50.0, 50.0)).expect("inside");
        body.apply_force(Vec2::new(5.0, 0.0));

        let integrator = Integrator::default();
        let registry = ForceRegistry::new();
        integrator.step_body(&mut body, &env, &registry, 0.0);
        integrator.step_body(&mut body, &env, &registry, f32::NAN);

        assert_eq!(body.position(), Vec2::new(50.0, 50.0));
        assert_eq!(body.pending_force(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn heavy_drag_stops_but_never_reverses() {
        let mut env = arena(Vec2::new(0.0, 0.0));
        env.add_zone(
            ResistanceZone::rect(Vec2::ZERO, Vec2::new(100.0, 100.0), 50.0).expect("valid zone"),
        );
        let mut body = Body::new(&env, 1.0, 5.0).expect("fits");
        body.place(&env, Vec2::new(20.0, 50.0)).expect("inside");
        body.apply_impulse(Vec2::new(10.0, 0.0));

        Integrator::new(1.0).step_body(&mut body, &env, &ForceRegistry::new(), 1.0);

        assert!(body.velocity().x.abs() < 1e-4);
        assert!((body.position().x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn overflowing_force_keeps_body_inside() {
        let env = arena(Vec2::new(0.0, 9.8));
        let mut body = Body::new(&env, 1e-3, 5.0).expect("fits");
        body.place(&env, Vec2::new(50.0, 50.0)).expect("inside");
        body.apply_force(Vec2::new(0.0, 1e38));

        let integrator = Integrator::new(0.0);
        let registry = ForceRegistry::new();
        for _ in 0..3 {
            integrator.step_body(&mut body, &env, &registry, 1.0);
            assert!(body.velocity().is_finite());
            assert!(env.contains_circle(body.position(), body.radius()));
        }
        assert_eq!(body.position(), Vec2::new(50.0, 95.0));
    }

    #[test]
    fn restitution_is_clamped() {
        let mut integrator = Integrator::new(2.0);
        assert_eq!(integrator.restitution(), 1.0);
        integrator.set_restitution(-1.0);
        assert_eq!(integrator.restitution(), 0.0);
    }
}
