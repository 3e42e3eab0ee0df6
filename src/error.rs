//! Error types for the Physix sandbox.
//!
//! This module provides a unified error type [`PhysixError`] and a convenient [`Result`] alias.
//! Only construction and placement can fail; stepping and force application never do.

use std::fmt;

use glam::Vec2;

use crate::utils::allocator::EntityId;

/// Main error type for the sandbox.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysixError {
    /// Environment corners do not describe a positive extent on both axes.
    InvalidBounds { top_left: Vec2, bottom_right: Vec2 },
    /// Body is too large to ever fit inside its environment.
    OversizedBody { radius: f32, width: f32, height: f32 },
    /// Placement target would put part of the circle outside the bounds.
    OutOfBounds { center: Vec2, radius: f32 },
    /// A scalar parameter (mass, radius, coefficient) is non-positive or not finite.
    InvalidParameter { name: &'static str, value: f32 },
    /// The body was built against a different environment than the one supplied.
    ForeignEnvironment,
    /// No live body is stored under this id.
    UnknownBody(EntityId),
}

impl fmt::Display for PhysixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidBounds {
                top_left,
                bottom_right,
            } => write!(
                f,
                "Invalid bounds: bottom-right {bottom_right} must exceed top-left {top_left} on both axes"
            ),
            Self::OversizedBody {
                radius,
                width,
                height,
            } => write!(
                f,
                "Body of radius {radius} does not fit in a {width}x{height} environment"
            ),
            Self::OutOfBounds { center, radius } => write!(
                f,
                "Body of radius {radius} centred at {center} exceeds the environment area"
            ),
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter: {name} = {value}")
            }
            Self::ForeignEnvironment => {
                write!(f, "Body belongs to a different environment")
            }
            Self::UnknownBody(id) => write!(f, "Body not found: {id:?}"),
        }
    }
}

impl std::error::Error for PhysixError {}

/// Convenient Result type alias for sandbox operations.
pub type Result<T> = std::result::Result<T, PhysixError>;

/// Rejects scalars that must be strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysixError::InvalidParameter { name, value })
    }
}
