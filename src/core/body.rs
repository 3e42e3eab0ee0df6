use glam::Vec2;
use log::trace;

use super::environment::{Environment, EnvironmentId};
use crate::error::{ensure_positive, PhysixError, Result};
use crate::utils::math::{Point, Vector2};

/// Anything a renderer can draw as a circle.
///
/// The simulation never calls a renderer; hosts read these values each frame
/// and hand them to whatever drawing surface they own.
pub trait Drawable {
    fn position(&self) -> Point;
    fn radius(&self) -> f32;
}

/// Circular point mass living inside an [`Environment`].
///
/// A body is validated against its environment when built and only takes part
/// in stepping once it has been placed.
#[derive(Debug, Clone)]
pub struct Body {
    environment: EnvironmentId,
    pub(crate) position: Point,
    pub(crate) velocity: Vector2,
    pub(crate) force: Vector2,
    mass: f32,
    radius: f32,
    placed: bool,
}

impl Body {
    /// Builds an unplaced body.
    ///
    /// Fails with [`PhysixError::OversizedBody`] when the diameter does not fit
    /// the environment's width or height.
    pub fn new(environment: &Environment, mass: f32, radius: f32) -> Result<Self> {
        let mass = ensure_positive("mass", mass)?;
        let radius = ensure_positive("radius", radius)?;

        let bounds = environment.bounds();
        let diameter = radius * 2.0;
        if diameter > bounds.width() || diameter > bounds.height() {
            return Err(PhysixError::OversizedBody {
                radius,
                width: bounds.width(),
                height: bounds.height(),
            });
        }

        Ok(Self {
            environment: environment.id(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass,
            radius,
            placed: false,
        })
    }

    /// Places the body at `center_offset`, measured from the environment's top-left corner.
    ///
    /// Resets velocity and any pending force. Placing again simply moves the body.
    pub fn place(&mut self, environment: &Environment, center_offset: Vector2) -> Result<Point> {
        if environment.id() != self.environment {
            return Err(PhysixError::ForeignEnvironment);
        }

        let center = environment.bounds().top_left + center_offset;
        if !environment.contains_circle(center, self.radius) {
            return Err(PhysixError::OutOfBounds {
                center,
                radius: self.radius,
            });
        }

        self.position = center;
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
        self.placed = true;
        Ok(center)
    }

    pub fn environment_id(&self) -> EnvironmentId {
        self.environment
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Force queued for the next tick.
    pub fn pending_force(&self) -> Vector2 {
        self.force
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }

    /// Updates the mass when `value` is positive and finite; otherwise keeps the old one.
    pub fn set_mass(&mut self, value: f32) -> bool {
        if !(value.is_finite() && value > 0.0) {
            trace!("ignoring mass update {value}: mass must be positive");
            return false;
        }
        self.mass = value;
        true
    }

    /// Instantaneous velocity change of `impulse / mass`.
    pub fn apply_impulse(&mut self, impulse: Vector2) {
        if !impulse.is_finite() {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Queues a force for the next tick, where it is integrated over `dt` and cleared.
    pub fn apply_force(&mut self, force: Vector2) {
        if !force.is_finite() {
            return;
        }
        self.force += force;
    }

    pub(crate) fn take_force(&mut self) -> Vector2 {
        std::mem::take(&mut self.force)
    }
}

impl Drawable for Body {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
