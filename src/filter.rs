//! Entity filtering: the predicate chain behind the map's filter controls.
//!
//! This module is a stateless reducer: every call re-evaluates the full
//! predicate chain over the full collection, in a fixed documented order, so
//! results are deterministic regardless of which filters are active. There is
//! no incremental update and no cached state; memoizing across unrelated
//! re-renders is the caller's job.
//!
//! Predicate order (AND-combined; an entity must pass every active one):
//! 1. Hobby match (exact, case-sensitive; the `"All"` sentinel is inactive)
//! 2. Place category match
//! 3. Live-only (entities without a live concept are excluded)
//! 4. Date range, relative to `now` at evaluation time
//! 5. Distance from the reference location (skipped when no reference is
//!    available, so a denied location permission never empties the map)
//! 6. User-drawn circular area

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geo;
use crate::{Coordinate, DateRange, FilterCriteria, LocatedEntity};

/// Compute the half-open UTC window `[start, end)` for a named date range.
///
/// - `Today`: midnight today through midnight tomorrow
/// - `Tomorrow`: midnight tomorrow through midnight the day after
/// - `ThisWeek`: midnight today through the end of the calendar week
///   (weeks run Sunday through Saturday)
pub fn date_window(range: DateRange, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    match range {
        DateRange::Today => (midnight_today, midnight_today + Duration::days(1)),
        DateRange::Tomorrow => (
            midnight_today + Duration::days(1),
            midnight_today + Duration::days(2),
        ),
        DateRange::ThisWeek => {
            let days_left = 7 - i64::from(now.date_naive().weekday().num_days_from_sunday());
            (midnight_today, midnight_today + Duration::days(days_left))
        }
    }
}

/// Check a single entity against the full predicate chain.
///
/// `reference` is the most recently delivered user location, or `None` when
/// the platform location service has not produced one; the distance predicate
/// degrades to pass-through in that case. `now` is taken as a parameter so
/// date-range evaluation is reproducible in tests.
pub fn entity_matches(
    entity: &LocatedEntity,
    criteria: &FilterCriteria,
    reference: Option<&Coordinate>,
    now: DateTime<Utc>,
) -> bool {
    // 1. Hobby
    if let Some(hobby) = criteria.hobby_filter() {
        if entity.hobby() != Some(hobby) {
            return false;
        }
    }

    // 2. Place category
    if let Some(category) = criteria.category.as_deref() {
        if entity.category() != Some(category) {
            return false;
        }
    }

    // 3. Live-only. Entities without the concept of "live" are excluded.
    if criteria.live_only && entity.is_live() != Some(true) {
        return false;
    }

    // 4. Date range. Unscheduled entities are excluded.
    if let Some(range) = criteria.date_range {
        let Some(start_time) = entity.start_time() else {
            return false;
        };
        let (start, end) = date_window(range, now);
        if start_time < start || start_time >= end {
            return false;
        }
    }

    // 5. Distance. Skipped entirely without a reference location.
    if let (Some(max_km), Some(reference)) = (criteria.max_distance_km, reference) {
        if !geo::is_within_radius_km(&entity.coordinate(), reference, max_km) {
            return false;
        }
    }

    // 6. Area
    if let Some(area) = &criteria.area {
        if !geo::is_within_radius_meters(&entity.coordinate(), &area.center, area.radius_meters) {
            return false;
        }
    }

    true
}

/// Reduce a collection to the subset matching `criteria`.
///
/// A stable filter: the output preserves the relative order of the input and
/// never re-sorts. Pure; applying the same criteria twice yields the same
/// result.
pub fn filter_entities(
    entities: &[LocatedEntity],
    criteria: &FilterCriteria,
    reference: Option<&Coordinate>,
    now: DateTime<Utc>,
) -> Vec<LocatedEntity> {
    entities
        .iter()
        .filter(|e| entity_matches(e, criteria, reference, now))
        .cloned()
        .collect()
}

/// Parallel variant of [`filter_entities`] for large collections.
///
/// Order-preserving: produces exactly the same output as the sequential
/// filter.
#[cfg(feature = "parallel")]
pub fn filter_entities_parallel(
    entities: &[LocatedEntity],
    criteria: &FilterCriteria,
    reference: Option<&Coordinate>,
    now: DateTime<Utc>,
) -> Vec<LocatedEntity> {
    entities
        .par_iter()
        .filter(|e| entity_matches(e, criteria, reference, now))
        .cloned()
        .collect()
}

/// Filter restricted to events tagged as friends' events.
///
/// The tag is supplied by the upstream data source; this is a pre-selection
/// followed by the same predicate chain.
pub fn filter_friend_events(
    entities: &[LocatedEntity],
    criteria: &FilterCriteria,
    reference: Option<&Coordinate>,
    now: DateTime<Utc>,
) -> Vec<LocatedEntity> {
    entities
        .iter()
        .filter(|e| e.is_friend_event())
        .filter(|e| entity_matches(e, criteria, reference, now))
        .cloned()
        .collect()
}

/// Filter restricted to events tagged as suggestions.
pub fn filter_suggested_events(
    entities: &[LocatedEntity],
    criteria: &FilterCriteria,
    reference: Option<&Coordinate>,
    now: DateTime<Utc>,
) -> Vec<LocatedEntity> {
    entities
        .iter()
        .filter(|e| e.is_suggested())
        .filter(|e| entity_matches(e, criteria, reference, now))
        .cloned()
        .collect()
}
