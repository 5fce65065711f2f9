use crate::{BoundingBox, OctantCode, OctreeConfig};

use glam::Vec3A;

pub type NodeId = u32;

/// The root always lives in the first slot of the arena.
pub const ROOT_ID: NodeId = 0;

/// Recursive 8-ary partition of a bounding box.
///
/// Nodes live in a flat arena and refer to their children by [`NodeId`]. A
/// node has either no children or exactly 8, created together by
/// subdivision. Subdivision is never undone; only [`Octree::clear`] shrinks
/// the tree.
///
/// Payloads are only written at terminal nodes, those at `max_depth`, so a
/// position maps to exactly one cell and a later insert into the same cell
/// replaces the earlier payload.
#[derive(Clone, Debug)]
pub struct Octree<T> {
    config: OctreeConfig,
    nodes: Vec<OctreeNode<T>>,
}

#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
    bounds: BoundingBox,
    children: Option<[NodeId; 8]>,
    data: Option<T>,
    level: u8,
}

impl<T> OctreeNode<T> {
    fn new(bounds: BoundingBox, level: u8) -> Self {
        Self {
            bounds,
            children: None,
            data: None,
            level,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child IDs indexed by [`OctantCode`] value, or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[NodeId; 8]> {
        self.children.as_ref()
    }

    #[inline]
    pub fn child(&self, octant: OctantCode) -> Option<NodeId> {
        self.children.map(|c| c[octant.value() as usize])
    }

    #[inline]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Counts gathered by [`Octree::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub total_nodes: usize,
    pub leaf_nodes: usize,
    pub internal_nodes: usize,
    pub nodes_with_data: usize,
    pub max_depth: u8,
}

impl<T> Octree<T> {
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            config,
            nodes: vec![OctreeNode::new(config.bounds, 0)],
        }
    }

    pub fn with_bounds(bounds: BoundingBox, max_depth: u8) -> Self {
        Self::new(OctreeConfig::new(bounds).with_max_depth(max_depth))
    }

    #[inline]
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.config.bounds
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }

    #[inline]
    pub fn root(&self) -> &OctreeNode<T> {
        &self.nodes[ROOT_ID as usize]
    }

    /// # Panics
    ///
    /// If `id` was not produced by this tree since the last [`Self::clear`].
    #[inline]
    pub fn node(&self, id: NodeId) -> &OctreeNode<T> {
        &self.nodes[id as usize]
    }

    pub fn all_nodes(&self) -> &[OctreeNode<T>] {
        &self.nodes
    }

    /// Split node `id` into 8 children at its center.
    ///
    /// Does nothing if the node already has children or sits at `max_depth`.
    pub fn subdivide(&mut self, id: NodeId) {
        let node = &self.nodes[id as usize];
        if node.is_leaf() && node.level < self.config.max_depth {
            self.subdivide_leaf(id);
        }
    }

    fn subdivide_leaf(&mut self, id: NodeId) -> [NodeId; 8] {
        let parent = &self.nodes[id as usize];
        debug_assert!(parent.is_leaf());

        let level = parent.level + 1;
        let child_bounds = parent.bounds.split(parent.bounds.center());
        tracing::trace!(node = id, level, "subdividing");

        let first_child = self.nodes.len() as NodeId;
        let child_ids = [0, 1, 2, 3, 4, 5, 6, 7].map(|i| first_child + i);
        self.nodes
            .extend(child_bounds.map(|bounds| OctreeNode::new(bounds, level)));
        self.nodes[id as usize].children = Some(child_ids);

        child_ids
    }

    /// Subdivide every node shallower than `depth`, clamped to `max_depth`.
    pub fn subdivide_to_depth(&mut self, depth: u8) {
        let depth = depth.min(self.config.max_depth);
        let mut stack = vec![ROOT_ID];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if node.level >= depth {
                continue;
            }
            let existing = node.children;
            let children = match existing {
                Some(children) => children,
                None => self.subdivide_leaf(id),
            };
            stack.extend(children);
        }
    }

    /// Store `data` in the terminal cell containing `position`, replacing any
    /// previous payload.
    ///
    /// Positions outside the root bounds are ignored.
    pub fn insert(&mut self, position: Vec3A, data: T) {
        if !self.config.bounds.contains(position) {
            tracing::debug!(?position, "ignoring insert outside of octree bounds");
            return;
        }
        let id = self.find_or_create_terminal(position);
        self.nodes[id as usize].data = Some(data);
    }

    fn find_or_create_terminal(&mut self, position: Vec3A) -> NodeId {
        let mut id = ROOT_ID;
        loop {
            let node = &self.nodes[id as usize];
            if node.level >= self.config.max_depth {
                return id;
            }
            let center = node.bounds.center();
            let existing = node.children;
            let children = match existing {
                Some(children) => children,
                None => self.subdivide_leaf(id),
            };
            id = children[OctantCode::from_position(position, center).value() as usize];
        }
    }

    /// The payload of the cell containing `position`, if one was inserted.
    pub fn find(&self, position: Vec3A) -> Option<&T> {
        if !self.config.bounds.contains(position) {
            return None;
        }
        let mut node = self.root();
        while let Some(children) = node.children {
            let octant = OctantCode::from_position(position, node.bounds.center());
            node = &self.nodes[children[octant.value() as usize] as usize];
        }
        node.data.as_ref()
    }

    /// Payloads of all leaves whose cell intersects `query`.
    ///
    /// Subtrees whose bounds miss `query` are skipped entirely.
    #[tracing::instrument(skip_all, name = "octree::query_bbox")]
    pub fn query_bbox(&self, query: &BoundingBox) -> Vec<&T> {
        let mut results = Vec::new();
        let mut stack = vec![ROOT_ID];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if !node.bounds.intersects(query) {
                continue;
            }
            match node.children {
                // Reversed so children pop in octant order.
                Some(children) => stack.extend(children.into_iter().rev()),
                None => results.extend(node.data.as_ref()),
            }
        }
        results
    }

    /// Payloads of nodes whose *cell center* lies within `radius` of `center`.
    ///
    /// This is an approximation: the distance is measured to the center of
    /// the terminal cell, not to the inserted position, so a payload may be
    /// missed or included by up to half a cell diagonal. Every node is
    /// visited; there is no spatial pruning.
    #[tracing::instrument(skip_all, name = "octree::query_radius")]
    pub fn query_radius(&self, center: Vec3A, radius: f32) -> Vec<&T> {
        let radius_sq = radius * radius;
        let mut results = Vec::new();
        self.visit_all(|_, node| {
            if let Some(data) = &node.data {
                if node.bounds.center().distance_squared(center) <= radius_sq {
                    results.push(data);
                }
            }
        });
        results
    }

    /// Pre-order traversal, children in octant order.
    pub fn visit_all<'a>(&'a self, mut visit: impl FnMut(NodeId, &'a OctreeNode<T>)) {
        let mut stack = vec![ROOT_ID];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            visit(id, node);
            if let Some(children) = node.children {
                stack.extend(children.into_iter().rev());
            }
        }
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        self.stats_recursive(ROOT_ID, &mut stats);
        stats
    }

    fn stats_recursive(&self, id: NodeId, stats: &mut OctreeStats) {
        let node = &self.nodes[id as usize];
        stats.total_nodes += 1;
        match node.children {
            None => stats.leaf_nodes += 1,
            Some(children) => {
                stats.internal_nodes += 1;
                for child in children {
                    self.stats_recursive(child, stats);
                }
            }
        }
        if node.has_data() {
            stats.nodes_with_data += 1;
        }
        stats.max_depth = stats.max_depth.max(node.level);
    }

    pub fn node_count(&self) -> usize {
        self.stats().total_nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.stats().leaf_nodes
    }

    /// Deepest level actually reached.
    pub fn effective_depth(&self) -> u8 {
        self.stats().max_depth
    }

    /// Drop every node and payload, leaving a single root leaf.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.nodes.len(), "clearing octree");
        self.nodes.clear();
        self.nodes.push(OctreeNode::new(self.config.bounds, 0));
    }
}

/// Nodes in a fully subdivided tree of the given depth: `(8^(d+1) - 1) / 7`.
///
/// `None` when the count does not fit in a `usize`.
pub fn theoretical_node_count(depth: u8) -> Option<usize> {
    let leaves_below = leaf_count_at_depth(depth)?.checked_mul(8)?;
    Some((leaves_below - 1) / 7)
}

/// Leaves in a fully subdivided tree of the given depth: `8^d`.
///
/// `None` when the count does not fit in a `usize`.
pub fn leaf_count_at_depth(depth: u8) -> Option<usize> {
    1usize.checked_shl(3 * depth as u32)
}
