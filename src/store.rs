use tracing::{error, info, warn};

use crate::{models::trip::Trip, services::trips::TripService};

/// In-memory mirror of the `trips` table, the snapshot the presentation layer
/// reads from. After every successful mutation the mirror is reloaded
/// wholesale from the database, never patched incrementally. Service errors
/// stop here: they are logged and surfaced as booleans or best-effort stale
/// reads, so the caller never handles an exception.
///
/// Single-threaded by construction (`&mut self` on every mutation); intended
/// for use from one UI event loop.
pub struct TripStore {
    service: TripService,
    trips: Vec<Trip>,
}

impl TripStore {
    pub fn new(service: TripService) -> Self {
        Self {
            service,
            trips: Vec::new(),
        }
    }

    /// Persists a new trip and refreshes the mirror. `false` on validation or
    /// database failure.
    pub async fn add(&mut self, trip: Trip) -> bool {
        match self.service.create(&trip).await {
            Ok(_) => {
                self.reload().await;
                true
            }
            Err(err) => {
                error!("failed to add trip: {err}");
                false
            }
        }
    }

    /// Deletes the trip at `index` in the mirror, resolving its database id
    /// first. Out-of-range indices and missing rows both yield `false`.
    pub async fn remove_at(&mut self, index: usize) -> bool {
        let Some(trip) = self.trips.get(index) else {
            return false;
        };
        let id = trip.id;
        match self.service.delete(id).await {
            Ok(true) => {
                self.reload().await;
                true
            }
            Ok(false) => false,
            Err(err) => {
                error!("failed to delete trip id={id}: {err}");
                false
            }
        }
    }

    pub async fn update(&mut self, trip: Trip) -> bool {
        let id = trip.id;
        match self.service.update(&trip).await {
            Ok(_) => {
                self.reload().await;
                true
            }
            Err(err) => {
                error!("failed to update trip id={id}: {err}");
                false
            }
        }
    }

    /// Refreshes the mirror and returns an independent copy of it. When the
    /// database is unreachable the current snapshot is served instead.
    pub async fn list_all(&mut self) -> Vec<Trip> {
        match self.service.list_all().await {
            Ok(trips) => self.trips = trips,
            Err(err) => warn!("failed to load trips, serving cached snapshot: {err}"),
        }
        self.trips.clone()
    }

    /// Pure mirror read, no database access.
    pub fn get_at(&self, index: usize) -> Option<&Trip> {
        self.trips.get(index)
    }

    /// Case-insensitive substring match on origin or destination, scanning
    /// only the mirror. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<Trip> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.trips
            .iter()
            .filter(|trip| {
                trip.origin.to_lowercase().contains(&query)
                    || trip.destination.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Replaces the mirror with the database's current contents. On failure
    /// the previous snapshot stays intact.
    pub async fn reload(&mut self) {
        match self.service.list_all().await {
            Ok(trips) => {
                self.trips = trips;
                info!("loaded {} trips from the database", self.trips.len());
            }
            Err(err) => error!("failed to reload trips, keeping previous snapshot: {err}"),
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
