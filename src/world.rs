mod stats;

pub use stats::StepStats;

use glam::Vec2;
use log::{debug, trace, warn};

use crate::{
    config::SimulationConfig,
    core::{
        body::{Body, Drawable},
        environment::Environment,
        zone::ResistanceZone,
    },
    dynamics::{
        forces::{ForceGenerator, ForceRegistry},
        integrator::Integrator,
    },
    error::{PhysixError, Result},
    utils::{
        allocator::{Arena, EntityId},
        logging::ScopedTimer,
        math::{Point, Vector2},
    },
};

/// A simulation session: one environment, the bodies inside it, and the stepper.
///
/// The host drives it one tick at a time with [`Simulator::step`], or with
/// wall-clock time through [`Simulator::advance`], and reads positions back
/// for rendering.
pub struct Simulator {
    environment: Environment,
    bodies: Arena<Body>,
    integrator: Integrator,
    force_registry: ForceRegistry,
    config: SimulationConfig,
    time_accumulated: f32,
    stats: StepStats,
}

impl Simulator {
    pub fn new(environment: Environment) -> Self {
        Self::with_config(environment, SimulationConfig::default())
    }

    pub fn with_config(environment: Environment, config: SimulationConfig) -> Self {
        let config = config.sanitized();
        Self {
            environment,
            bodies: Arena::new(),
            integrator: Integrator::new(config.restitution),
            force_registry: ForceRegistry::new(),
            config,
            time_accumulated: 0.0,
            stats: StepStats::default(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    /// Permissive: a non-positive gravity vector is ignored and `false` returned.
    pub fn set_gravity(&mut self, gravity: Vec2) -> bool {
        self.environment.set_gravity(gravity)
    }

    pub fn restitution(&self) -> f32 {
        self.integrator.restitution()
    }

    /// Sets wall restitution, clamped to `[0, 1]`.
    pub fn set_restitution(&mut self, restitution: f32) {
        self.integrator.set_restitution(restitution);
        self.config.restitution = self.integrator.restitution();
    }

    /// Requests rayon integration. Has no effect without the `parallel` feature.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.config.parallel = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        cfg!(feature = "parallel") && self.config.parallel
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.force_registry.add_force(force);
    }

    pub fn clear_forces(&mut self) {
        self.force_registry.clear();
    }

    pub fn add_zone(&mut self, zone: ResistanceZone) -> EntityId {
        self.environment.add_zone(zone)
    }

    pub fn remove_zone(&mut self, id: EntityId) -> Option<ResistanceZone> {
        self.environment.remove_zone(id)
    }

    /// Builds a body against this session's environment and stores it unplaced.
    pub fn spawn_body(&mut self, mass: f32, radius: f32) -> Result<EntityId> {
        let body = Body::new(&self.environment, mass, radius)?;
        Ok(self.bodies.insert(body))
    }

    /// Stores a body built elsewhere. It must belong to this session's environment.
    ///
    /// A body that was already placed is registered straight away.
    pub fn insert_body(&mut self, body: Body) -> Result<EntityId> {
        if body.environment_id() != self.environment.id() {
            return Err(PhysixError::ForeignEnvironment);
        }
        let placed = body.is_placed();
        let id = self.bodies.insert(body);
        if placed {
            self.environment.register(id);
        }
        Ok(id)
    }

    /// Places (or moves) a body relative to the environment's top-left corner.
    pub fn place_body(&mut self, id: EntityId, center_offset: Vector2) -> Result<Point> {
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(PhysixError::UnknownBody(id))?;
        let position = body.place(&self.environment, center_offset)?;

        if self.environment.register(id) {
            debug!("placed body {id:?} at {position}");
        } else {
            debug!("moved body {id:?} to {position}");
        }
        Ok(position)
    }

    pub fn remove_body(&mut self, id: EntityId) -> Option<Body> {
        let body = self.bodies.remove(id)?;
        self.environment.unregister(id);
        debug!("removed body {id:?}");
        Some(body)
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (EntityId, &Body)> + '_ {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Queues a force for the body's next tick.
    pub fn apply_force(&mut self, id: EntityId, force: Vector2) -> Result<()> {
        self.bodies
            .get_mut(id)
            .ok_or(PhysixError::UnknownBody(id))?
            .apply_force(force);
        Ok(())
    }

    /// Changes the body's velocity immediately by `impulse / mass`.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vector2) -> Result<()> {
        self.bodies
            .get_mut(id)
            .ok_or(PhysixError::UnknownBody(id))?
            .apply_impulse(impulse);
        Ok(())
    }

    /// Placed bodies, ready to hand to a renderer.
    pub fn drawables(&self) -> impl Iterator<Item = &dyn Drawable> + '_ {
        self.bodies
            .iter()
            .filter(|(_, body)| body.is_placed())
            .map(|(_, body)| body as &dyn Drawable)
    }

    /// Current positions of every placed body.
    pub fn positions(&self) -> Vec<(EntityId, Point)> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.is_placed())
            .map(|(id, body)| (id, body.position()))
            .collect()
    }

    /// Advances every placed body by `dt` and returns their new positions.
    ///
    /// A non-positive or non-finite `dt` leaves the world as it is.
    pub fn step(&mut self, dt: f32) -> Vec<(EntityId, Point)> {
        if !(dt.is_finite() && dt > 0.0) {
            trace!("skipping step with dt = {dt}");
            return self.positions();
        }

        let parallel = self.parallel_enabled();
        let timer = ScopedTimer::new("step");
        let (positions, contacts) = integrate_all(
            &mut self.bodies,
            &self.environment,
            &self.integrator,
            &self.force_registry,
            dt,
            parallel,
        );
        self.stats.record(positions.len(), contacts, timer.elapsed());
        positions
    }

    /// Advances a single body by `dt`, leaving the others alone.
    pub fn step_body(&mut self, id: EntityId, dt: f32) -> Option<Point> {
        let body = self.bodies.get_mut(id)?;
        let outcome = self
            .integrator
            .step_body(body, &self.environment, &self.force_registry, dt);
        Some(outcome.position)
    }

    /// Feeds wall-clock time into a fixed-timestep accumulator.
    ///
    /// Runs as many whole `time_step` ticks as fit, up to
    /// `max_steps_per_advance`; any backlog past that is dropped. Returns the
    /// number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return 0;
        }

        let _timer = ScopedTimer::new("advance");
        let time_step = self.config.time_step;
        self.time_accumulated += elapsed;

        let mut steps = 0;
        while self.time_accumulated >= time_step {
            if steps == self.config.max_steps_per_advance {
                let dropped = (self.time_accumulated / time_step).floor();
                warn!("simulation fell behind, dropping {dropped} tick(s)");
                self.time_accumulated %= time_step;
                break;
            }
            self.time_accumulated -= time_step;
            self.step(time_step);
            steps += 1;
        }
        steps
    }
}

fn integrate_all(
    bodies: &mut Arena<Body>,
    environment: &Environment,
    integrator: &Integrator,
    registry: &ForceRegistry,
    dt: f32,
    parallel: bool,
) -> (Vec<(EntityId, Point)>, usize) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            let _timer = ScopedTimer::new("step::integrate_parallel");
            use rayon::prelude::*;

            let outcomes: Vec<_> = bodies
                .par_iter_mut()
                .filter(|(_, body)| body.is_placed())
                .map(|(id, body)| (id, integrator.step_body(body, environment, registry, dt)))
                .collect();
            let contacts: usize = outcomes.iter().map(|(_, o)| o.contact.count()).sum();
            let positions: Vec<_> = outcomes.into_iter().map(|(id, o)| (id, o.position)).collect();
            return (positions, contacts);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let _timer = ScopedTimer::new("step::integrate");
    let mut positions = Vec::with_capacity(bodies.len());
    let mut contacts = 0;
    for (id, body) in bodies.iter_mut() {
        if !body.is_placed() {
            continue;
        }
        let outcome = integrator.step_body(body, environment, registry, dt);
        contacts += outcome.contact.count();
        positions.push((id, outcome.position));
    }
    (positions, contacts)
}
