//! Collision handling: bodies against the environment walls.

pub mod boundary;

pub use boundary::{resolve_boundary, BoundaryContact};
