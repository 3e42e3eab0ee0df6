use glam::Vec2;

use crate::core::environment::Bounds;

/// Which axes hit a wall during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryContact {
    pub x: bool,
    pub y: bool,
}

impl BoundaryContact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    pub fn count(&self) -> usize {
        usize::from(self.x) + usize::from(self.y)
    }
}

/// Pushes a circle back inside `bounds` and bounces its velocity.
///
/// Each axis is handled on its own, so a corner hit resolves both. The
/// position is clamped so the circle is tangent to the wall. A velocity
/// component heading into that wall is reversed and scaled by `restitution`.
pub fn resolve_boundary(
    position: &mut Vec2,
    velocity: &mut Vec2,
    radius: f32,
    bounds: &Bounds,
    restitution: f32,
) -> BoundaryContact {
    let min = bounds.min_center(radius);
    let max = bounds.max_center(radius);

    BoundaryContact {
        x: resolve_axis(&mut position.x, &mut velocity.x, min.x, max.x, restitution),
        y: resolve_axis(&mut position.y, &mut velocity.y, min.y, max.y, restitution),
    }
}

fn resolve_axis(
    position: &mut f32,
    velocity: &mut f32,
    min: f32,
    max: f32,
    restitution: f32,
) -> bool {
    if position.is_nan() {
        *position = min;
        *velocity = 0.0;
        return true;
    }

    let hit = if *position < min {
        *position = min;
        if *velocity < 0.0 {
            *velocity = -*velocity * restitution;
        }
        true
    } else if *position > max {
        *position = max;
        if *velocity > 0.0 {
            *velocity = -*velocity * restitution;
        }
        true
    } else {
        false
    };

    if !velocity.is_finite() {
        *velocity = 0.0;
    }
    hit
}
