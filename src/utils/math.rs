//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// 2D vector used for velocities and forces.
pub type Vector2 = Vec2;

/// 2D point in environment coordinates (Y grows downward).
pub type Point = Vec2;

/// Caps the magnitude of `v` at `max_length`, keeping its direction.
pub fn clamp_length_to(v: Vec2, max_length: f32) -> Vec2 {
    let max_length = max_length.max(0.0);
    let length = v.length();
    if length <= max_length || length == 0.0 {
        v
    } else {
        v * (max_length / length)
    }
}

/// True when every component is finite and the vector is not zero-length.
pub fn has_positive_magnitude(v: Vec2) -> bool {
    v.is_finite() && v.length_squared() > 0.0
}

/// Replaces every non-finite component with zero.
pub fn zero_non_finite(v: Vec2) -> Vec2 {
    Vec2::select(v.is_finite_mask(), v, Vec2::ZERO)
}
