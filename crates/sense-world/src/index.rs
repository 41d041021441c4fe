//! Spatial index over observer positions.
//!
//! Event handlers need "every observer within R cells of here" to build
//! their candidate list.  An R-tree (via `rstar`) answers that without
//! scanning the whole population.  Queries are on the map plane only;
//! elevation is left to the strategies.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sense_core::{ObserverId, Position};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct ObserverEntry {
    point: [i64; 2], // [x, y]
    id:    ObserverId,
}

impl RTreeObject for ObserverEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObserverEntry {
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[inline]
fn plane(pos: Position) -> [i64; 2] {
    [i64::from(pos.x), i64::from(pos.y)]
}

// ── ObserverIndex ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ObserverIndex {
    tree: RTree<ObserverEntry>,
}

impl ObserverIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load from `(id, position)` pairs.
    pub fn from_observers(observers: impl IntoIterator<Item = (ObserverId, Position)>) -> Self {
        let entries = observers
            .into_iter()
            .map(|(id, pos)| ObserverEntry { point: plane(pos), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn insert(&mut self, id: ObserverId, pos: Position) {
        self.tree.insert(ObserverEntry { point: plane(pos), id });
    }

    /// Remove `id` previously inserted at `pos`.  Returns `false` if it was
    /// not there.
    pub fn remove(&mut self, id: ObserverId, pos: Position) -> bool {
        self.tree.remove(&ObserverEntry { point: plane(pos), id }).is_some()
    }

    /// Observers whose map-plane distance from `center` is at most `radius`,
    /// in ascending id order.
    pub fn within_radius(&self, center: Position, radius: u32) -> Vec<ObserverId> {
        let r = i64::from(radius);
        let mut ids: Vec<ObserverId> = self
            .tree
            .locate_within_distance(plane(center), r * r)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Closest observer to `center` on the map plane.
    pub fn nearest(&self, center: Position) -> Option<ObserverId> {
        self.tree.nearest_neighbor(&plane(center)).map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
