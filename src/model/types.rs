use serde::{Deserialize, Serialize};

use crate::{RouteId, StopId, StopIndex, Time, TripId};

/// A boarding location with CSR ranges into the per-stop route index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub routes_start: usize,
    pub routes_len: usize,
    /// Partition cell used for arc-flag pruning, in `[0, num_partitions)`.
    pub cell: usize,
}

/// An equivalence class of trips sharing one stop sequence.
///
/// Trips of a route are numbered consecutively starting at `first_trip` and
/// are ordered by departure time at every stop index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub first_trip: TripId,
    pub num_trips: usize,
    pub stops_start: usize,
    pub num_stops: usize,
}

/// One occurrence of a stop within a route's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub route: RouteId,
    pub stop_index: StopIndex,
}

/// The (stop, arrival, departure) record of a single stop event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArrivalEvent {
    pub stop: StopId,
    pub arrival: Time,
    pub departure: Time,
}

/// A trip boardable from a source stop, with the effective time the rider
/// has to leave the source to catch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureAnchor {
    pub trip: TripId,
    pub stop_index: StopIndex,
    pub departure: Time,
}
