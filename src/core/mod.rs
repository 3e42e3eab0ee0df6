//! Core simulation entities: the bounded environment, bodies, and drag zones.

pub mod body;
pub mod environment;
pub mod zone;

pub use body::{Body, Drawable};
pub use environment::{Bounds, Environment, EnvironmentId};
pub use zone::{DragModel, ResistanceZone, ZoneShape};
