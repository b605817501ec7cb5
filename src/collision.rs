//! Axis-aligned bounding-box collision tests.
//!
//! Queries are a linear scan: `colliding` is O(n) per subject, so a frame
//! where every entity queries is O(n²). That is fine for the few dozen
//! entities on screen at once; a spatial index would be needed well before
//! thousands.

use crate::entities::{Entity, EntityId, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.pos, entity.size)
    }

    /// Strictly positive intersection on both axes. Boxes that only share an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    Aabb::of(a).overlaps(&Aabb::of(b))
}

/// Ids of every Active, non-explosion entity in `others` that overlaps
/// `subject`, excluding `subject` itself, in the iteration order of `others`.
///
/// Explosions never take part in collisions, neither as subject nor as hit.
pub fn colliding<'a, I>(subject: &Entity, others: I) -> Vec<EntityId>
where
    I: IntoIterator<Item = &'a Entity>,
{
    if subject.is_explosion() {
        return Vec::new();
    }
    let bounds = Aabb::of(subject);
    others
        .into_iter()
        .filter(|o| o.id != subject.id && o.is_active() && !o.is_explosion())
        .filter(|o| Aabb::of(o).overlaps(&bounds))
        .map(|o| o.id)
        .collect()
}
