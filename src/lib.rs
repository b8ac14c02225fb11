//! # Placemap
//!
//! Geospatial filtering and marker clustering for map-based event discovery.
//!
//! This library provides the computational core behind an interactive
//! events-and-places map:
//! - Great-circle distance and radius membership (haversine)
//! - A composable filter predicate chain (hobby, category, live, date, distance, area)
//! - Marker clustering by shared location for overlap-free map rendering
//! - An R-tree spatial index for viewport and radius queries
//!
//! All operations are pure and synchronous: the caller owns the entity
//! collection, hands it in by reference, and receives a derived value back.
//! Nothing here retains entities, performs I/O, or caches results.
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel filtering with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use placemap::cluster::{cluster_entities, ClusterConfig};
//! use placemap::filter::filter_entities;
//! use placemap::{Coordinate, Event, FilterCriteria, LocatedEntity};
//!
//! let events: Vec<LocatedEntity> = vec![
//!     LocatedEntity::Event(Event {
//!         id: "ev-1".to_string(),
//!         coordinate: Coordinate::new(51.505, -0.09),
//!         hobby: "Climbing".to_string(),
//!         start_time: Utc::now(),
//!         attendee_count: 12,
//!         is_live: true,
//!         is_friend: false,
//!         is_suggested: false,
//!     }),
//! ];
//!
//! let criteria = FilterCriteria {
//!     hobby: Some("Climbing".to_string()),
//!     ..FilterCriteria::default()
//! };
//!
//! let visible = filter_entities(&events, &criteria, None, Utc::now());
//! let markers = cluster_entities(&visible, &ClusterConfig::default());
//! assert_eq!(markers.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{PlacemapError, Result};

// Geographic utilities (haversine distance, radius membership)
pub mod geo;

// Filter predicate chain
pub mod filter;
#[cfg(feature = "parallel")]
pub use filter::filter_entities_parallel;
pub use filter::{
    entity_matches, filter_entities, filter_friend_events, filter_suggested_events,
};

// Marker clustering by shared location
pub mod cluster;
pub use cluster::{cluster_entities, Cluster, ClusterConfig, MapMarker};

// R-tree spatial index for viewport queries
pub mod spatial;
pub use spatial::{EntityIndex, EntityPosition};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate in decimal degrees.
///
/// # Example
/// ```
/// use placemap::Coordinate;
/// let point = Coordinate::new(51.505, -0.09); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    ///
    /// The constructor is infallible; use [`Coordinate::validate`] to reject
    /// malformed values at ingestion time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Validate the coordinate, returning an error suitable for rejecting
    /// malformed upstream data before it enters a collection.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PlacemapError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Geographic bounding box (a map viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds enclosing a set of coordinates.
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        if coordinates.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for c in coordinates {
            min_lat = min_lat.min(c.latitude);
            max_lat = max_lat.max(c.latitude);
            min_lng = min_lng.min(c.longitude);
            max_lng = max_lng.max(c.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a coordinate falls inside the bounds (inclusive).
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude >= self.min_lat
            && coordinate.latitude <= self.max_lat
            && coordinate.longitude >= self.min_lng
            && coordinate.longitude <= self.max_lng
    }
}

/// A scheduled event at a location.
///
/// The `is_friend` and `is_suggested` tags are supplied by the upstream data
/// source (social graph / recommendation backend); this library only reads
/// them when deriving the friend and suggested views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, immutable for the entity's lifetime
    pub id: String,
    pub coordinate: Coordinate,
    /// Hobby category (e.g., "Climbing", "Chess")
    pub hobby: String,
    /// Scheduled start time (UTC)
    pub start_time: DateTime<Utc>,
    pub attendee_count: u32,
    /// True when the event is currently in progress
    pub is_live: bool,
    #[serde(default)]
    pub is_friend: bool,
    #[serde(default)]
    pub is_suggested: bool,
}

/// A fixed place of interest (venue, shop, meeting spot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique identifier, immutable for the entity's lifetime
    pub id: String,
    pub coordinate: Coordinate,
    /// Place category (e.g., "Cafe", "Sports hall")
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Optional call-to-action label shown on the marker popup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Anything that can be placed on the map: an [`Event`] or a [`Place`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LocatedEntity {
    Event(Event),
    Place(Place),
}

impl LocatedEntity {
    /// Unique identifier of the underlying entity.
    pub fn id(&self) -> &str {
        match self {
            LocatedEntity::Event(e) => &e.id,
            LocatedEntity::Place(p) => &p.id,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            LocatedEntity::Event(e) => e.coordinate,
            LocatedEntity::Place(p) => p.coordinate,
        }
    }

    /// Hobby category; `None` for places, which have no hobby concept.
    pub fn hobby(&self) -> Option<&str> {
        match self {
            LocatedEntity::Event(e) => Some(&e.hobby),
            LocatedEntity::Place(_) => None,
        }
    }

    /// Place category; `None` for events.
    pub fn category(&self) -> Option<&str> {
        match self {
            LocatedEntity::Event(_) => None,
            LocatedEntity::Place(p) => Some(&p.category),
        }
    }

    /// Scheduled start time; `None` for places, which are not scheduled.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        match self {
            LocatedEntity::Event(e) => Some(e.start_time),
            LocatedEntity::Place(_) => None,
        }
    }

    /// Live flag; `None` for entities without the concept of "live".
    pub fn is_live(&self) -> Option<bool> {
        match self {
            LocatedEntity::Event(e) => Some(e.is_live),
            LocatedEntity::Place(_) => None,
        }
    }

    /// True when the upstream data source tagged this as a friend's event.
    pub fn is_friend_event(&self) -> bool {
        matches!(self, LocatedEntity::Event(e) if e.is_friend)
    }

    /// True when the upstream data source tagged this as a suggestion.
    pub fn is_suggested(&self) -> bool {
        matches!(self, LocatedEntity::Event(e) if e.is_suggested)
    }

    /// Validate the entity's coordinate.
    pub fn validate(&self) -> Result<()> {
        self.coordinate().validate()
    }
}

/// A user-drawn circular region of interest.
///
/// Created transiently while an area filter is active and discarded on
/// clear; the radius comes from an on-map drag and is denominated in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSelection {
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl AreaSelection {
    /// Create an area selection. The radius must be strictly positive.
    pub fn new(center: Coordinate, radius_meters: f64) -> Result<Self> {
        if radius_meters > 0.0 {
            Ok(Self {
                center,
                radius_meters,
            })
        } else {
            Err(PlacemapError::InvalidRadius { radius_meters })
        }
    }
}

/// Named date window for the date-range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Today,
    Tomorrow,
    ThisWeek,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Tomorrow => "tomorrow",
            DateRange::ThisWeek => "this_week",
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DateRange {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(DateRange::Today),
            "tomorrow" => Ok(DateRange::Tomorrow),
            "this_week" => Ok(DateRange::ThisWeek),
            _ => Err(()),
        }
    }
}

/// Sentinel hobby value meaning "no hobby filter".
pub const HOBBY_ALL: &str = "All";

/// The full set of filter controls as the UI exposes them.
///
/// A default-constructed criteria has no active predicates and passes every
/// entity through. Criteria are plain values: reconstructed on every edit,
/// compared by field, no hidden state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Hobby filter; `None` or [`HOBBY_ALL`] means inactive
    #[serde(default)]
    pub hobby: Option<String>,
    /// Place category filter
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum distance from the reference location, in kilometers
    #[serde(default)]
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// When true, only entities currently live pass
    #[serde(default)]
    pub live_only: bool,
    /// User-drawn circular area; `None` means no area filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaSelection>,
}

impl FilterCriteria {
    /// The active hobby filter, treating the [`HOBBY_ALL`] sentinel as unset.
    pub fn hobby_filter(&self) -> Option<&str> {
        match self.hobby.as_deref() {
            None | Some(HOBBY_ALL) => None,
            Some(hobby) => Some(hobby),
        }
    }
}
