//! Owner-keyed place cache with fetch-or-reuse resolution.
//!
//! The cache holds at most one user's place list at a time. Every list
//! request resolves through [`PlaceCache::display_places`]: reuse the held
//! list when it belongs to the requesting user and no refresh is armed,
//! otherwise fetch. A failed fetch empties the cache and surfaces the
//! server's message untouched, so the list view degrades to "empty plus
//! alert" instead of showing another user's stale data.

use std::cmp::Ordering;

use crate::api::RemotePlaces;
use crate::error::CoreError;
use crate::state::{Coordinate, DisplayPlace, Place, SortOrder};
use crate::{geo, util};

/// Cached place list keyed by its owning user.
#[derive(Debug, Default)]
pub struct PlaceCache {
    /// Held list; `None` until the first successful fetch (and again after a
    /// failed one). An empty `Some` is a valid, reusable result.
    places: Option<Vec<Place>>,
    /// Id of the user the held list belongs to. Empty when nothing is held.
    owner_user_id: String,
    /// One-shot refresh flag armed by navigation; consumed by the next
    /// resolution.
    force_fetch: bool,
}

impl PlaceCache {
    /// Empty cache owned by nobody.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot refresh: the next resolution fetches even when the
    /// owner matches.
    pub fn request_force_fetch(&mut self) {
        self.force_fetch = true;
    }

    /// Whether a forced refresh is currently armed.
    #[must_use]
    pub fn force_fetch_pending(&self) -> bool {
        self.force_fetch
    }

    /// Drop the held list and its ownership. Used on logout.
    pub fn invalidate(&mut self) {
        self.places = None;
        self.owner_user_id.clear();
        self.force_fetch = false;
    }

    /// Resolve the display list for `user_id`.
    ///
    /// Reuses the held list iff it is present, owned by `user_id` and no
    /// forced refresh is armed; otherwise fetches from `remote`. Either way
    /// the result is enriched with distances from `location` and sorted by
    /// `order` (stable, so equal distances keep their server order).
    ///
    /// # Errors
    /// - `CoreError::NoUser` when `user_id` is blank; the cache is untouched.
    /// - `CoreError::FetchFailed` when the remote call fails; the held list
    ///   and its owner are cleared first, and the message is the server's.
    pub async fn display_places<R: RemotePlaces>(
        &mut self,
        remote: &R,
        user_id: &str,
        location: Option<&Coordinate>,
        order: SortOrder,
    ) -> Result<Vec<DisplayPlace>, CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::NoUser);
        }

        let reusable =
            !self.force_fetch && self.owner_user_id == user_id && self.places.is_some();
        if reusable {
            tracing::debug!(user_id, "[Cache] reusing held place list");
        } else {
            tracing::debug!(
                user_id,
                forced = self.force_fetch,
                "[Cache] fetching place list"
            );
            // The flag is one-shot: consumed by this resolution whether the
            // fetch succeeds or fails.
            self.force_fetch = false;
            match remote.places_for(user_id).await {
                Ok(list) => {
                    tracing::info!(user_id, count = list.len(), "[Cache] place list fetched");
                    self.places = Some(list);
                    self.owner_user_id = user_id.to_string();
                }
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "[Cache] fetch failed, cache emptied");
                    self.places = None;
                    self.owner_user_id.clear();
                    return Err(CoreError::FetchFailed {
                        message: e.to_string(),
                    });
                }
            }
        }

        let held = self.places.as_deref().unwrap_or_default();
        Ok(decorate_and_sort(held, location, order))
    }

    /// Remove the held place with `place_id`, keeping the rest in order.
    pub fn remove_place(&mut self, place_id: &str) {
        if let Some(places) = self.places.as_mut() {
            places.retain(|p| p.id != place_id);
        }
    }

    /// Replace the held copy of `place` (matched by id) with the server's
    /// updated record; covers edits and enable/disable toggles. List
    /// identity, order and ownership are untouched; a later reuse sees the
    /// mutated copy. A place the cache does not hold is ignored.
    pub fn apply_update(&mut self, place: Place) {
        if let Some(places) = self.places.as_mut() {
            if let Some(slot) = places.iter_mut().find(|p| p.id == place.id) {
                *slot = place;
            }
        }
    }
}

/// Derive display rows from the held list: distance from the last fix plus a
/// formatted reminder date, then a stable distance sort.
fn decorate_and_sort(
    places: &[Place],
    location: Option<&Coordinate>,
    order: SortOrder,
) -> Vec<DisplayPlace> {
    let mut rows: Vec<DisplayPlace> = places
        .iter()
        .map(|place| {
            let place_coord = place.coordinate();
            DisplayPlace {
                location_distance: geo::distance_km(location, place_coord.as_ref()),
                display_date: place.reminder_date.as_deref().map(util::display_date),
                place: place.clone(),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        let cmp = a
            .location_distance
            .partial_cmp(&b.location_distance)
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::NearestFirst => cmp,
            SortOrder::FarthestFirst => cmp.reverse(),
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::PlaceCache;
    use crate::api::{ApiError, RemotePlaces};
    use crate::error::CoreError;
    use crate::state::{Coordinate, Place, SortOrder};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remote returning a fixed outcome and counting calls.
    struct CountingRemote {
        outcome: Result<Vec<Place>, ApiError>,
        calls: AtomicUsize,
    }

    impl CountingRemote {
        fn ok(places: Vec<Place>) -> Self {
            Self {
                outcome: Ok(places),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Err(ApiError::Server {
                    message: message.into(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RemotePlaces for CountingRemote {
        async fn places_for(&self, _user_id: &str) -> Result<Vec<Place>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn place(id: &str, user_id: &str, latitude: f64, longitude: f64) -> Place {
        Place {
            id: id.into(),
            name: format!("place {id}"),
            latitude: Some(latitude),
            longitude: Some(longitude),
            reminder_message: None,
            reminder_date: None,
            is_disable: false,
            user_id: user_id.into(),
            created_at: "2024-04-01".into(),
        }
    }

    fn here() -> Coordinate {
        Coordinate {
            latitude: 10.0,
            longitude: 10.0,
        }
    }

    #[tokio::test]
    /// What: A blank user id short-circuits without touching the remote.
    ///
    /// - Input: Empty and whitespace-only user ids
    /// - Output: `CoreError::NoUser`; zero remote calls
    async fn blank_user_is_no_user() {
        let remote = CountingRemote::ok(vec![]);
        let mut cache = PlaceCache::new();
        let err = cache
            .display_places(&remote, "", None, SortOrder::NearestFirst)
            .await
            .expect_err("no user");
        assert!(matches!(err, CoreError::NoUser));
        let err = cache
            .display_places(&remote, "   ", None, SortOrder::NearestFirst)
            .await
            .expect_err("no user");
        assert!(matches!(err, CoreError::NoUser));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    /// What: A matching owner reuses the held list without refetching.
    ///
    /// - Input: Two resolutions for the same user
    /// - Output: One remote call; identical lists both times
    async fn same_owner_reuses_without_fetch() {
        let remote = CountingRemote::ok(vec![place("p1", "u1", 11.0, 11.0)]);
        let mut cache = PlaceCache::new();
        let first = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::NearestFirst)
            .await
            .expect("first fetch");
        let second = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::NearestFirst)
            .await
            .expect("reuse");
        assert_eq!(remote.calls(), 1);
        assert_eq!(first.len(), 1);
        assert_eq!(second[0].place.id, "p1");
    }

    #[tokio::test]
    /// What: A different user never sees the held list.
    ///
    /// - Input: Resolution for `u1`, then for `u2`
    /// - Output: Two remote calls; the second result belongs to `u2`
    async fn owner_switch_refetches() {
        let remote = CountingRemote::ok(vec![place("p9", "u2", 12.0, 12.0)]);
        let mut cache = PlaceCache::new();
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("fetch for u1");
        let rows = cache
            .display_places(&remote, "u2", None, SortOrder::NearestFirst)
            .await
            .expect("fetch for u2");
        assert_eq!(remote.calls(), 2);
        assert_eq!(rows[0].place.user_id, "u2");
    }

    #[tokio::test]
    /// What: The forced-refresh flag triggers exactly one extra fetch.
    ///
    /// - Input: Fetch, arm force-fetch, resolve twice more
    /// - Output: Second resolution fetches, third reuses (flag not sticky)
    async fn force_fetch_is_one_shot() {
        let remote = CountingRemote::ok(vec![place("p1", "u1", 11.0, 11.0)]);
        let mut cache = PlaceCache::new();
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("initial fetch");
        cache.request_force_fetch();
        assert!(cache.force_fetch_pending());
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("forced fetch");
        assert!(!cache.force_fetch_pending());
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("reuse");
        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test]
    /// What: A failed fetch empties the cache and surfaces the server text.
    ///
    /// - Input: Remote that rejects with a message; then a healthy remote
    /// - Output: `FetchFailed` carrying the exact message; the next
    ///   resolution fetches again instead of reusing
    async fn failed_fetch_empties_cache() {
        let good = CountingRemote::ok(vec![place("p1", "u1", 11.0, 11.0)]);
        let bad = CountingRemote::failing("database is on fire");
        let mut cache = PlaceCache::new();
        cache
            .display_places(&good, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("initial fetch");
        cache.request_force_fetch();
        let err = cache
            .display_places(&bad, "u1", None, SortOrder::NearestFirst)
            .await
            .expect_err("failure");
        match err {
            CoreError::FetchFailed { message } => assert_eq!(message, "database is on fire"),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        // Ownership was cleared, so even the same user must refetch.
        cache
            .display_places(&good, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("refetch after failure");
        assert_eq!(good.calls(), 2);
    }

    #[tokio::test]
    /// What: Rows sort by distance in both directions, placeless rows first
    /// ascending.
    ///
    /// - Input: Near place, far place, and one with no coordinates
    /// - Output: Ascending puts the zero-distance row first; descending
    ///   reverses the order
    async fn sorts_by_distance_both_ways() {
        let mut no_coords = place("p0", "u1", 0.0, 0.0);
        no_coords.latitude = None;
        no_coords.longitude = None;
        let remote = CountingRemote::ok(vec![
            place("far", "u1", 20.0, 20.0),
            no_coords,
            place("near", "u1", 10.1, 10.1),
        ]);
        let mut cache = PlaceCache::new();
        let asc = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::NearestFirst)
            .await
            .expect("ascending");
        let ids: Vec<&str> = asc.iter().map(|r| r.place.id.as_str()).collect();
        assert_eq!(ids, ["p0", "near", "far"]);
        assert_eq!(asc[0].location_distance, 0.0);
        let desc = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::FarthestFirst)
            .await
            .expect("descending");
        let ids: Vec<&str> = desc.iter().map(|r| r.place.id.as_str()).collect();
        assert_eq!(ids, ["far", "near", "p0"]);
    }

    #[tokio::test]
    /// What: Local mutations edit the held list in place without refetching.
    ///
    /// - Input: Write through a disabled copy of one place, remove another
    /// - Output: Next resolution reuses (one remote call total) and reflects
    ///   both mutations
    async fn local_mutations_survive_reuse() {
        let remote = CountingRemote::ok(vec![
            place("p1", "u1", 11.0, 11.0),
            place("p2", "u1", 12.0, 12.0),
        ]);
        let mut cache = PlaceCache::new();
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("fetch");
        let mut toggled = place("p1", "u1", 11.0, 11.0);
        toggled.is_disable = true;
        cache.apply_update(toggled);
        cache.remove_place("p2");
        let rows = cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("reuse");
        assert_eq!(remote.calls(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].place.id, "p1");
        assert!(rows[0].place.is_disable);
    }

    #[tokio::test]
    /// What: Equidistant rows keep their fetch order in both orderings.
    ///
    /// - Input: Two places at the same distance plus two with no coordinates
    ///   (both resolving to zero distance)
    /// - Output: Ascending and descending keep each tied group in fetch
    ///   order; descending only swaps the groups
    async fn equal_distances_keep_fetch_order() {
        let mut blank_a = place("blank_a", "u1", 0.0, 0.0);
        blank_a.latitude = None;
        blank_a.longitude = None;
        let mut blank_b = place("blank_b", "u1", 0.0, 0.0);
        blank_b.latitude = None;
        blank_b.longitude = None;
        // twin_a and twin_b sit at the exact same coordinate.
        let remote = CountingRemote::ok(vec![
            place("twin_a", "u1", 12.0, 12.0),
            blank_a,
            place("twin_b", "u1", 12.0, 12.0),
            blank_b,
        ]);
        let mut cache = PlaceCache::new();
        let asc = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::NearestFirst)
            .await
            .expect("ascending");
        let ids: Vec<&str> = asc.iter().map(|r| r.place.id.as_str()).collect();
        assert_eq!(ids, ["blank_a", "blank_b", "twin_a", "twin_b"]);
        assert_eq!(asc[2].location_distance, asc[3].location_distance);
        let desc = cache
            .display_places(&remote, "u1", Some(&here()), SortOrder::FarthestFirst)
            .await
            .expect("descending");
        let ids: Vec<&str> = desc.iter().map(|r| r.place.id.as_str()).collect();
        assert_eq!(ids, ["twin_a", "twin_b", "blank_a", "blank_b"]);
    }

    #[tokio::test]
    /// What: A server-confirmed edit replaces the held copy by id.
    ///
    /// - Input: Updated record for a held place; an update for an unheld id
    /// - Output: Held copy reflects the edit on reuse; unknown id is ignored
    async fn apply_update_replaces_held_copy() {
        let remote = CountingRemote::ok(vec![place("p1", "u1", 11.0, 11.0)]);
        let mut cache = PlaceCache::new();
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("fetch");
        let mut edited = place("p1", "u1", 11.0, 11.0);
        edited.name = "renamed".into();
        cache.apply_update(edited);
        cache.apply_update(place("ghost", "u1", 1.0, 1.0));
        let rows = cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("reuse");
        assert_eq!(remote.calls(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].place.name, "renamed");
    }

    #[tokio::test]
    /// What: Logout invalidation forgets list, owner and any armed refresh.
    ///
    /// - Input: Populated cache, `invalidate`, resolution for the same user
    /// - Output: The resolution fetches again
    async fn invalidate_forgets_everything() {
        let remote = CountingRemote::ok(vec![place("p1", "u1", 11.0, 11.0)]);
        let mut cache = PlaceCache::new();
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("fetch");
        cache.request_force_fetch();
        cache.invalidate();
        assert!(!cache.force_fetch_pending());
        cache
            .display_places(&remote, "u1", None, SortOrder::NearestFirst)
            .await
            .expect("refetch");
        assert_eq!(remote.calls(), 2);
    }
}
