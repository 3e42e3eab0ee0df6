//! Physix – a minimal bounded 2D physics sandbox.
//!
//! An [`Environment`] defines a rectangular arena and a gravity field. Circular
//! [`Body`] point masses are placed inside it. The [`Simulator`] advances them
//! in fixed ticks with semi-implicit Euler integration, applying gravity,
//! queued forces and impulses, drag from [`ResistanceZone`]s, and restitution
//! at the walls. Rendering is left to the host, which reads positions back
//! through the [`Drawable`] trait.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::boundary::{resolve_boundary, BoundaryContact};
pub use config::SimulationConfig;
pub use crate::core::{
    body::{Body, Drawable},
    environment::{Bounds, Environment, EnvironmentId},
    zone::{DragModel, ResistanceZone, ZoneShape},
};
pub use dynamics::{
    forces::{ConstantForce, ForceGenerator, ForceRegistry},
    integrator::{Integrator, StepOutcome},
};
pub use error::{PhysixError, Result};
pub use utils::{
    allocator::EntityId,
    math::{Point, Vector2},
};
pub use world::{Simulator, StepStats};
