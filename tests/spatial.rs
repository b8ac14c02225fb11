//! Tests for the spatial index

use chrono::{TimeZone, Utc};
use placemap::{Bounds, Coordinate, EntityIndex, Event, LocatedEntity, Place};

fn event_at(id: &str, latitude: f64, longitude: f64) -> LocatedEntity {
    LocatedEntity::Event(Event {
        id: id.to_string(),
        coordinate: Coordinate::new(latitude, longitude),
        hobby: "Climbing".to_string(),
        start_time: Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap(),
        attendee_count: 4,
        is_live: false,
        is_friend: false,
        is_suggested: false,
    })
}

fn place_at(id: &str, latitude: f64, longitude: f64) -> LocatedEntity {
    LocatedEntity::Place(Place {
        id: id.to_string(),
        coordinate: Coordinate::new(latitude, longitude),
        category: "Cafe".to_string(),
        price: None,
        action: None,
    })
}

#[test]
fn test_empty_index() {
    let index = EntityIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    let hits = index.query_viewport(&Bounds {
        min_lat: -90.0,
        max_lat: 90.0,
        min_lng: -180.0,
        max_lng: 180.0,
    });
    assert!(hits.is_empty());
}

#[test]
fn test_query_viewport() {
    let entities = vec![
        event_at("ev-london", 51.505, -0.09),
        place_at("pl-london", 51.51, -0.10),
        event_at("ev-paris", 48.8566, 2.3522),
    ];
    let index = EntityIndex::from_entities(&entities);
    assert_eq!(index.len(), 3);

    // A London viewport excludes Paris
    let mut hits = index.query_viewport(&Bounds {
        min_lat: 51.40,
        max_lat: 51.60,
        min_lng: -0.20,
        max_lng: 0.00,
    });
    hits.sort();
    assert_eq!(hits, vec!["ev-london", "pl-london"]);
}

#[test]
fn test_find_nearby() {
    let entities = vec![
        event_at("ev-center", 51.505, -0.09),
        event_at("ev-450m", 51.505 + 0.00404, -0.09),
        event_at("ev-5km", 51.55, -0.09),
    ];
    let index = EntityIndex::from_entities(&entities);

    let mut hits = index.find_nearby(51.505, -0.09, 500.0);
    hits.sort();
    assert_eq!(hits, vec!["ev-450m", "ev-center"]);

    let mut hits = index.find_nearby(51.505, -0.09, 10_000.0);
    hits.sort();
    assert_eq!(hits, vec!["ev-450m", "ev-5km", "ev-center"]);
}

#[test]
fn test_insert_and_clear() {
    let mut index = EntityIndex::new();
    index.insert(&event_at("ev-1", 51.505, -0.09));
    index.insert(&place_at("pl-1", 51.51, -0.10));
    assert_eq!(index.len(), 2);

    index.clear();
    assert!(index.is_empty());
}
