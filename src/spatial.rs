//! Spatial indexing for viewport queries.
//!
//! Uses an R-tree of entity point positions so the rendering layer can cull
//! to the visible map viewport, or look up entities near a tapped point,
//! without scanning the whole collection. The index stores only ids and
//! coordinates; entities themselves stay with the caller.

use rstar::{RTree, RTreeObject, AABB};

use crate::geo::meters_to_degrees;
use crate::{Bounds, LocatedEntity};

/// Point position of one entity, as stored in the R-tree.
#[derive(Debug, Clone)]
pub struct EntityPosition {
    pub entity_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RTreeObject for EntityPosition {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.longitude, self.latitude])
    }
}

/// Spatial index over entity positions.
#[derive(Debug)]
pub struct EntityIndex {
    tree: RTree<EntityPosition>,
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from an entity collection.
    pub fn from_entities(entities: &[LocatedEntity]) -> Self {
        let positions: Vec<EntityPosition> = entities
            .iter()
            .map(|entity| {
                let c = entity.coordinate();
                EntityPosition {
                    entity_id: entity.id().to_string(),
                    latitude: c.latitude,
                    longitude: c.longitude,
                }
            })
            .collect();

        Self {
            tree: RTree::bulk_load(positions),
        }
    }

    /// Insert a single entity's position.
    pub fn insert(&mut self, entity: &LocatedEntity) {
        let c = entity.coordinate();
        self.tree.insert(EntityPosition {
            entity_id: entity.id().to_string(),
            latitude: c.latitude,
            longitude: c.longitude,
        });
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Ids of entities inside a viewport.
    pub fn query_viewport(&self, bounds: &Bounds) -> Vec<String> {
        let search_bounds = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );

        self.tree
            .locate_in_envelope_intersecting(&search_bounds)
            .map(|p| p.entity_id.clone())
            .collect()
    }

    /// Ids of entities within a bounding box sized `radius_meters` around a
    /// point.
    ///
    /// This is a box query sized from the meter radius; callers needing exact
    /// circular membership should confirm with
    /// [`geo::is_within_radius_meters`](crate::geo::is_within_radius_meters).
    pub fn find_nearby(&self, latitude: f64, longitude: f64, radius_meters: f64) -> Vec<String> {
        let radius_degrees = meters_to_degrees(radius_meters, latitude);
        self.query_viewport(&Bounds {
            min_lat: latitude - radius_degrees,
            max_lat: latitude + radius_degrees,
            min_lng: longitude - radius_degrees,
            max_lng: longitude + radius_degrees,
        })
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
