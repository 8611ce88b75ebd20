//! Spatial index for resolving clicks to map points

use rstar::primitives::GeomWithData;
use rstar::RTree;

use gf_core::{GeoCoord, PointId};

use crate::scene::MapScene;

type IndexedPoint = GeomWithData<[f64; 2], (PointId, GeoCoord)>;

/// R-tree over every point of a scene.
///
/// Points are stored as (lon * scale, lat) with the scale taken at the scene
/// center, so that distances match on-screen distances.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    lon_scale: f64,
}

impl PointIndex {
    /// Index all finite points of both layers
    pub fn build(scene: &MapScene) -> Self {
        let lon_scale = scene.lon_scale();
        let points = scene
            .points()
            .filter(|point| point.position.is_finite())
            .map(|point| {
                let position = point.position;
                GeomWithData::new([position.lon * lon_scale, position.lat], (point.id, position))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(points),
            lon_scale,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest point to `target`, with its position
    pub fn nearest(&self, target: GeoCoord) -> Option<(PointId, GeoCoord)> {
        self.tree
            .nearest_neighbor(&[target.lon * self.lon_scale, target.lat])
            .map(|hit| hit.data)
    }
}
