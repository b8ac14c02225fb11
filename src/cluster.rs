//! Marker clustering: merge co-located entities into aggregate map markers.
//!
//! Entities are partitioned by coordinate rounded to a fixed number of
//! decimal places; groups at or above a size threshold collapse into a single
//! aggregate marker, smaller groups render as individual markers. Both knobs
//! live in [`ClusterConfig`].
//!
//! Clustering is a pure partitioning pass over an in-memory list. Output
//! order is deterministic for a stable input ordering: groups appear in
//! first-seen order and members keep insertion order, which is what keeps
//! markers from flickering across re-renders.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{Coordinate, LocatedEntity};

/// Configuration for marker clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Decimal places of coordinate rounding used to decide "same location".
    /// Default: 5 (~1.1 m at the equator). Finer under-clusters nearby but
    /// distinct venues; coarser over-merges.
    pub precision_decimals: u32,

    /// Minimum group size that collapses into one aggregate marker.
    /// Default: 5. Groups below this render each member individually.
    pub min_cluster_size: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            precision_decimals: 5,
            min_cluster_size: 5,
        }
    }
}

/// An aggregate of entities sharing one map location.
///
/// Derived and ephemeral: recomputed on every render pass from the current
/// filtered set, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Where the aggregate marker is drawn (the first member's coordinate)
    pub coordinate: Coordinate,
    /// Members in input order
    pub members: Vec<LocatedEntity>,
}

impl Cluster {
    /// Number of entities in the cluster.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One marker for the map layer: either a single entity or an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapMarker {
    Single(LocatedEntity),
    Cluster(Cluster),
}

impl MapMarker {
    /// Where the marker is drawn.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            MapMarker::Single(entity) => entity.coordinate(),
            MapMarker::Cluster(cluster) => cluster.coordinate,
        }
    }

    /// Number of entities the marker represents.
    pub fn count(&self) -> usize {
        match self {
            MapMarker::Single(_) => 1,
            MapMarker::Cluster(cluster) => cluster.len(),
        }
    }
}

/// Rounded-coordinate grouping key.
fn coordinate_key(coordinate: &Coordinate, precision_decimals: u32) -> (i64, i64) {
    let scale = 10_f64.powi(precision_decimals as i32);
    (
        (coordinate.latitude * scale).round() as i64,
        (coordinate.longitude * scale).round() as i64,
    )
}

/// Decide which entities render individually and which merge into aggregates.
///
/// Empty input yields empty output; a single entity is always its own group
/// regardless of threshold.
///
/// # Example
/// ```
/// use placemap::cluster::{cluster_entities, ClusterConfig};
/// use placemap::{Coordinate, LocatedEntity, Place};
///
/// let spot = Coordinate::new(51.505, -0.09);
/// let places: Vec<LocatedEntity> = (0..5)
///     .map(|i| {
///         LocatedEntity::Place(Place {
///             id: format!("place-{i}"),
///             coordinate: spot,
///             category: "Cafe".to_string(),
///             price: None,
///             action: None,
///         })
///     })
///     .collect();
///
/// let markers = cluster_entities(&places, &ClusterConfig::default());
/// assert_eq!(markers.len(), 1);
/// assert_eq!(markers[0].count(), 5);
/// ```
pub fn cluster_entities(entities: &[LocatedEntity], config: &ClusterConfig) -> Vec<MapMarker> {
    if entities.is_empty() {
        return vec![];
    }

    // Partition by rounded coordinate, remembering first-seen group order.
    let mut group_order: Vec<(i64, i64)> = Vec::new();
    let mut groups: HashMap<(i64, i64), Vec<&LocatedEntity>> = HashMap::new();

    for entity in entities {
        let key = coordinate_key(&entity.coordinate(), config.precision_decimals);
        groups
            .entry(key)
            .or_insert_with(|| {
                group_order.push(key);
                Vec::new()
            })
            .push(entity);
    }

    let mut markers = Vec::with_capacity(entities.len());
    for key in &group_order {
        let members = &groups[key];
        if members.len() >= config.min_cluster_size {
            markers.push(MapMarker::Cluster(Cluster {
                coordinate: members[0].coordinate(),
                members: members.iter().map(|e| (*e).clone()).collect(),
            }));
        } else {
            for entity in members {
                markers.push(MapMarker::Single((*entity).clone()));
            }
        }
    }

    debug!(
        "clustered {} entities into {} markers ({} groups)",
        entities.len(),
        markers.len(),
        group_order.len()
    );

    markers
}

/// Serialize markers to JSON for the rendering layer.
///
/// Returns `"[]"` on serialization failure rather than propagating an error
/// into the render path.
pub fn markers_to_json(markers: &[MapMarker]) -> String {
    serde_json::to_string(markers).unwrap_or_else(|e| {
        warn!("Failed to serialize {} map markers: {}", markers.len(), e);
        "[]".to_string()
    })
}
