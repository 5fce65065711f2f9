use crate::OctantCode;

use glam::Vec3A;

/// Axis-aligned box with closed bounds on every axis.
///
/// No invariant is enforced; callers keep `min <= max` componentwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl BoundingBox {
    #[inline]
    pub fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3A, half_extents: Vec3A) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3A {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3A {
        self.max - self.min
    }

    pub fn volume(&self) -> f32 {
        self.size().x * self.size().y * self.size().z
    }

    /// Boundary points are contained.
    #[inline]
    pub fn contains(&self, point: Vec3A) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Boxes sharing only a face, edge or corner still intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Restrict this box to the half toward `octant` on each axis, split at
    /// `center`.
    pub fn octant(&self, octant: OctantCode, center: Vec3A) -> Self {
        let positive = glam::BVec3A::new(octant.x_sign(), octant.y_sign(), octant.z_sign());
        Self {
            min: Vec3A::select(positive, center, self.min),
            max: Vec3A::select(positive, self.max, center),
        }
    }

    /// The 8 children produced by splitting at `center`, indexed by octant.
    ///
    /// Children share their split planes exactly, so together they tile this
    /// box.
    pub fn split(&self, center: Vec3A) -> [Self; 8] {
        OctantCode::ALL.map(|o| self.octant(o, center))
    }
}
