use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use log::trace;
use serde::{Deserialize, Serialize};

use super::zone::ResistanceZone;
use crate::error::{PhysixError, Result};
use crate::utils::allocator::{Arena, EntityId};
use crate::utils::math::{has_positive_magnitude, Point};

static NEXT_ENVIRONMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an [`Environment`]; bodies keep one as their back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvironmentId(u64);

impl EnvironmentId {
    fn next() -> Self {
        Self(NEXT_ENVIRONMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Axis-aligned rectangle in screen space: `top_left` is the minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Bounds {
    /// Fails unless `bottom_right` is strictly greater than `top_left` on both axes.
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        let valid = top_left.is_finite()
            && bottom_right.is_finite()
            && top_left.x < bottom_right.x
            && top_left.y < bottom_right.y;
        if !valid {
            return Err(PhysixError::InvalidBounds {
                top_left,
                bottom_right,
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn size(&self) -> Vec2 {
        self.bottom_right - self.top_left
    }

    /// Lowest centre coordinate a circle of `radius` may take on each axis.
    pub fn min_center(&self, radius: f32) -> Point {
        self.top_left + Vec2::splat(radius)
    }

    /// Highest centre coordinate a circle of `radius` may take on each axis.
    pub fn max_center(&self, radius: f32) -> Point {
        self.bottom_right - Vec2::splat(radius)
    }

    /// True iff the whole circle lies inside; touching an edge counts as inside.
    ///
    /// Compares the centre against [`Bounds::min_center`]/[`Bounds::max_center`] so that a
    /// centre clamped to those values is always accepted.
    pub fn contains_circle(&self, center: Point, radius: f32) -> bool {
        if !(radius >= 0.0) || !center.is_finite() {
            return false;
        }
        let min = self.min_center(radius);
        let max = self.max_center(radius);
        center.x >= min.x && center.x <= max.x && center.y >= min.y && center.y <= max.y
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains_circle(point, 0.0)
    }
}

/// Bounded arena with a uniform gravity field.
///
/// Also records which bodies have been placed in it and owns the drag zones.
/// Nothing mutates it while a tick is running.
#[derive(Debug)]
pub struct Environment {
    id: EnvironmentId,
    bounds: Bounds,
    gravity: Vec2,
    zones: Arena<ResistanceZone>,
    bodies: BTreeSet<EntityId>,
}

impl Environment {
    pub fn new(gravity: Vec2, top_left: Point, bottom_right: Point) -> Result<Self> {
        let bounds = Bounds::new(top_left, bottom_right)?;
        Ok(Self {
            id: EnvironmentId::next(),
            bounds,
            gravity,
            zones: Arena::new(),
            bodies: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> EnvironmentId {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Replaces gravity when `value` has a positive, finite magnitude.
    ///
    /// Anything else is ignored and the current value is kept; the return
    /// value reports whether the update was applied.
    pub fn set_gravity(&mut self, value: Vec2) -> bool {
        if !has_positive_magnitude(value) {
            trace!("ignoring gravity update {value}: magnitude must be positive");
            return false;
        }
        self.gravity = value;
        true
    }

    pub fn contains_circle(&self, center: Point, radius: f32) -> bool {
        self.bounds.contains_circle(center, radius)
    }

    pub fn add_zone(&mut self, zone: ResistanceZone) -> EntityId {
        self.zones.insert(zone)
    }

    pub fn remove_zone(&mut self, id: EntityId) -> Option<ResistanceZone> {
        self.zones.remove(id)
    }

    pub fn zone(&self, id: EntityId) -> Option<&ResistanceZone> {
        self.zones.get(id)
    }

    pub fn zones(&self) -> impl Iterator<Item = (EntityId, &ResistanceZone)> + '_ {
        self.zones.iter()
    }

    /// Summed raw drag of every zone containing `position`. Not yet clamped.
    pub fn drag_at(&self, position: Point, velocity: Vec2) -> Vec2 {
        self.zones
            .iter()
            .filter(|(_, zone)| zone.contains(position))
            .map(|(_, zone)| zone.drag_force(velocity))
            .sum()
    }

    /// Ids of bodies placed in this environment, in ascending order.
    pub fn placed_bodies(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.bodies.iter().copied()
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.bodies.contains(&id)
    }

    /// Returns `false` when the body was already registered.
    pub(crate) fn register(&mut self, id: EntityId) -> bool {
        self.bodies.insert(id)
    }

    pub(crate) fn unregister(&mut self, id: EntityId) -> bool {
        self.bodies.remove(&id)
    }
}
