use crate::{phase::NUM_PHASES, BoundingBox, Octree, OctreeConfig};

use glam::Vec3A;
use std::array;

/// 12 independent [`Octree`]s, one per phase, sharing only their geometry.
///
/// Every operation selects a sub-tree with a raw phase in `0..12`. Unlike
/// [`PhaseCode`](crate::PhaseCode), an out-of-range phase does not wrap: it
/// is ignored, yielding nothing.
///
/// Sub-trees never share nodes, so callers may hand each one to a different
/// thread through [`Self::phase_octrees_mut`].
#[derive(Clone, Debug)]
pub struct TemporalOctree<T> {
    octrees: [Octree<T>; NUM_PHASES as usize],
}

/// Totals over all phases, from [`TemporalOctree::global_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalStats {
    pub total_nodes: usize,
    pub total_data: usize,
    pub max_depth: u8,
}

impl<T> TemporalOctree<T> {
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            octrees: array::from_fn(|_| Octree::new(config)),
        }
    }

    pub fn with_bounds(bounds: BoundingBox, max_depth: u8) -> Self {
        Self::new(OctreeConfig::new(bounds).with_max_depth(max_depth))
    }

    pub fn config(&self) -> &OctreeConfig {
        self.octrees[0].config()
    }

    pub fn phase_octree(&self, phase: u8) -> Option<&Octree<T>> {
        self.octrees.get(phase as usize)
    }

    pub fn phase_octree_mut(&mut self, phase: u8) -> Option<&mut Octree<T>> {
        self.octrees.get_mut(phase as usize)
    }

    /// All sub-trees, indexed by phase.
    pub fn phase_octrees_mut(&mut self) -> &mut [Octree<T>; NUM_PHASES as usize] {
        &mut self.octrees
    }

    pub fn insert(&mut self, phase: u8, position: Vec3A, data: T) {
        match self.phase_octree_mut(phase) {
            Some(tree) => tree.insert(position, data),
            None => tracing::debug!(phase, "ignoring insert for out-of-range phase"),
        }
    }

    pub fn find(&self, phase: u8, position: Vec3A) -> Option<&T> {
        self.phase_octree(phase)?.find(position)
    }

    pub fn query_bbox(&self, phase: u8, query: &BoundingBox) -> Vec<&T> {
        self.phase_octree(phase)
            .map(|tree| tree.query_bbox(query))
            .unwrap_or_default()
    }

    pub fn query_radius(&self, phase: u8, center: Vec3A, radius: f32) -> Vec<&T> {
        self.phase_octree(phase)
            .map(|tree| tree.query_radius(center, radius))
            .unwrap_or_default()
    }

    /// Results of every phase concatenated in phase order, without
    /// deduplication.
    pub fn query_bbox_all_phases(&self, query: &BoundingBox) -> Vec<&T> {
        self.octrees
            .iter()
            .flat_map(|tree| tree.query_bbox(query))
            .collect()
    }

    /// Results of every phase concatenated in phase order, without
    /// deduplication.
    pub fn query_radius_all_phases(&self, center: Vec3A, radius: f32) -> Vec<&T> {
        self.octrees
            .iter()
            .flat_map(|tree| tree.query_radius(center, radius))
            .collect()
    }

    pub fn clear(&mut self) {
        for tree in &mut self.octrees {
            tree.clear();
        }
    }

    pub fn global_stats(&self) -> GlobalStats {
        self.octrees
            .iter()
            .map(Octree::stats)
            .fold(GlobalStats::default(), |mut g, s| {
                g.total_nodes += s.total_nodes;
                g.total_data += s.nodes_with_data;
                g.max_depth = g.max_depth.max(s.max_depth);
                g
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tree(max_depth: u8) -> TemporalOctree<u32> {
        TemporalOctree::with_bounds(
            BoundingBox::new(Vec3A::splat(-1.0), Vec3A::splat(1.0)),
            max_depth,
        )
    }

    #[test]
    fn phases_are_isolated() {
        let mut t = tree(3);
        let p = Vec3A::new(0.2, -0.4, 0.6);
        t.insert(5, p, 7);
        assert_eq!(t.find(5, p), Some(&7));
        assert_eq!(t.find(6, p), None);
        assert_eq!(t.find(4, p), None);
        assert_eq!(t.phase_octree(6).unwrap().node_count(), 1);
    }

    #[test]
    fn out_of_range_phase_is_ignored() {
        let mut t = tree(2);
        let p = Vec3A::splat(0.5);
        t.insert(12, p, 1);
        t.insert(200, p, 2);
        assert_eq!(t.global_stats().total_nodes, 12);
        assert_eq!(t.find(12, p), None);
        // No wrap-around onto phase 0.
        assert_eq!(t.find(0, p), None);
        assert!(t.query_bbox(12, t.config().bounds()).is_empty());
        assert!(t.query_radius(99, p, 10.0).is_empty());
        assert!(t.phase_octree(12).is_none());
    }

    #[test]
    fn all_phase_queries_concatenate_in_order() {
        let mut t = tree(1);
        let p = Vec3A::splat(0.5);
        t.insert(3, p, 30);
        t.insert(0, p, 0);
        t.insert(11, p, 110);
        t.insert(11, Vec3A::splat(-0.5), 111);

        let bounds = *t.config().bounds();
        assert_eq!(t.query_bbox_all_phases(&bounds), vec![&0, &30, &111, &110]);
        assert_eq!(t.query_bbox(11, &bounds), vec![&111, &110]);
        assert_eq!(t.query_radius_all_phases(p, 0.1), vec![&0, &30, &110]);
    }

    #[test]
    fn duplicates_across_phases_are_kept() {
        let mut t = tree(1);
        let p = Vec3A::splat(-0.5);
        for phase in 0..12 {
            t.insert(phase, p, 9);
        }
        assert_eq!(t.query_bbox_all_phases(t.config().bounds()).len(), 12);
    }

    #[test]
    fn stats_and_clear() {
        let mut t = tree(2);
        t.insert(1, Vec3A::splat(0.5), 1);
        t.insert(2, Vec3A::splat(0.5), 2);
        let g = t.global_stats();
        assert_eq!(g.total_nodes, 10 + 2 * 17);
        assert_eq!(g.total_data, 2);
        assert_eq!(g.max_depth, 2);

        t.clear();
        assert_eq!(
            t.global_stats(),
            GlobalStats {
                total_nodes: 12,
                total_data: 0,
                max_depth: 0
            }
        );
    }

    #[test]
    fn sub_trees_can_be_filled_in_parallel() {
        let mut t = tree(2);
        std::thread::scope(|s| {
            for (phase, octree) in t.phase_octrees_mut().iter_mut().enumerate() {
                s.spawn(move || octree.insert(Vec3A::splat(0.1), phase as u32));
            }
        });
        for phase in 0..12u8 {
            assert_eq!(t.find(phase, Vec3A::splat(0.1)), Some(&(phase as u32)));
        }
    }
}
