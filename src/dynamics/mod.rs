//! Simulation dynamics: force accumulation and time integration.

pub mod forces;
pub mod integrator;

pub use forces::{
    accumulate_forces, clamp_drag_force, gravity_force, ConstantForce, ForceGenerator,
    ForceRegistry,
};
pub use integrator::{Integrator, StepOutcome};
