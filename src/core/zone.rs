use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::MIN_SPEED;
use crate::error::{ensure_positive, PhysixError, Result};
use crate::utils::math::Point;

/// Region covered by a [`ResistanceZone`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneShape {
    Rect { top_left: Point, bottom_right: Point },
    Circle { center: Point, radius: f32 },
}

impl ZoneShape {
    /// Edges are inclusive for both shapes.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            ZoneShape::Rect {
                top_left,
                bottom_right,
            } => {
                point.x >= top_left.x
                    && point.x <= bottom_right.x
                    && point.y >= top_left.y
                    && point.y <= bottom_right.y
            }
            ZoneShape::Circle { center, radius } => {
                point.distance_squared(center) <= radius * radius
            }
        }
    }
}

/// How drag magnitude scales with speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragModel {
    /// `c * |v|`, viscous flow.
    Linear,
    /// `c * |v|^2`, turbulent flow.
    #[default]
    Quadratic,
}

/// Region that pushes back against the motion of bodies inside it.
///
/// Zones are passive: the simulator queries them for bodies whose centre lies
/// inside and caps the combined drag so it can stop a body but never reverse it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZone")]
pub struct ResistanceZone {
    shape: ZoneShape,
    coefficient: f32,
    model: DragModel,
}

/// Unvalidated wire form; deserialized zones go through [`ResistanceZone::new`].
#[derive(Deserialize)]
struct RawZone {
    shape: ZoneShape,
    coefficient: f32,
    #[serde(default)]
    model: DragModel,
}

impl TryFrom<RawZone> for ResistanceZone {
    type Error = PhysixError;

    fn try_from(raw: RawZone) -> Result<Self> {
        Ok(Self::new(raw.shape, raw.coefficient)?.with_model(raw.model))
    }
}

impl ResistanceZone {
    pub fn new(shape: ZoneShape, coefficient: f32) -> Result<Self> {
        match shape {
            ZoneShape::Rect {
                top_left,
                bottom_right,
            } => {
                if !(top_left.is_finite() && bottom_right.is_finite()) {
                    return Err(PhysixError::InvalidParameter {
                        name: "zone corner",
                        value: f32::NAN,
                    });
                }
                ensure_positive("zone width", bottom_right.x - top_left.x)?;
                ensure_positive("zone height", bottom_right.y - top_left.y)?;
            }
            ZoneShape::Circle { center, radius } => {
                ensure_positive("zone radius", radius)?;
                if !center.is_finite() {
                    return Err(PhysixError::InvalidParameter {
                        name: "zone center",
                        value: f32::NAN,
                    });
                }
            }
        }

        if !(coefficient.is_finite() && coefficient >= 0.0) {
            return Err(PhysixError::InvalidParameter {
                name: "drag coefficient",
                value: coefficient,
            });
        }

        Ok(Self {
            shape,
            coefficient,
            model: DragModel::default(),
        })
    }

    pub fn rect(top_left: Point, bottom_right: Point, coefficient: f32) -> Result<Self> {
        Self::new(
            ZoneShape::Rect {
                top_left,
                bottom_right,
            },
            coefficient,
        )
    }

    pub fn circle(center: Point, radius: f32, coefficient: f32) -> Result<Self> {
        Self::new(ZoneShape::Circle { center, radius }, coefficient)
    }

    pub fn with_model(mut self, model: DragModel) -> Self {
        self.model = model;
        self
    }

    pub fn shape(&self) -> ZoneShape {
        self.shape
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    pub fn model(&self) -> DragModel {
        self.model
    }

    pub fn contains(&self, point: Point) -> bool {
        self.shape.contains(point)
    }

    /// Raw drag opposing `velocity`. Callers clamp it against momentum.
    pub fn drag_force(&self, velocity: Vec2) -> Vec2 {
        let speed = velocity.length();
        if speed < MIN_SPEED {
            return Vec2::ZERO;
        }

        let magnitude = match self.model {
            DragModel::Linear => self.coefficient * speed,
            DragModel::Quadratic => self.coefficient * speed * speed,
        };
        -velocity / speed * magnitude
    }
}
