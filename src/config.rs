use crate::BoundingBox;

/// Depth used when none is given.
pub const DEFAULT_MAX_DEPTH: u8 = 8;

/// Geometry shared by an [`Octree`](crate::Octree) and every phase of a
/// [`TemporalOctree`](crate::TemporalOctree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctreeConfig {
    /// Root cell. Positions outside of it are ignored.
    pub bounds: BoundingBox,
    /// Level of the terminal cells that hold data. The root is level 0.
    pub max_depth: u8,
}

impl OctreeConfig {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Edge lengths of a terminal cell.
    pub fn terminal_cell_size(&self) -> glam::Vec3A {
        self.bounds.size() / 2f32.powi(self.max_depth as i32)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use glam::Vec3A;

    #[test]
    fn defaults_and_builder() {
        let bounds = BoundingBox::new(Vec3A::ZERO, Vec3A::splat(16.0));
        let config = OctreeConfig::new(bounds);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.terminal_cell_size(), Vec3A::splat(16.0 / 256.0));

        let shallow = config.with_max_depth(2);
        assert_eq!(shallow.max_depth, 2);
        assert_eq!(shallow.bounds, bounds);
        assert_eq!(shallow.terminal_cell_size(), Vec3A::splat(4.0));
        assert_eq!(shallow.bounds(), &bounds);
    }

    #[test]
    fn terminal_cell_size_past_64_levels() {
        let config = OctreeConfig::new(BoundingBox::new(Vec3A::ZERO, Vec3A::splat(16.0)));
        let deep = config.with_max_depth(100).terminal_cell_size();
        assert_eq!(deep, Vec3A::splat(2f32.powi(-96)));
        assert!(deep.cmplt(config.with_max_depth(63).terminal_cell_size()).all());
    }
}
