//! The immutable trip-based dataset and methods to work with it.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::graph::StaticGraph;
use super::types::{ArrivalEvent, Route, RouteSegment, Stop};
use crate::error::{Error, QueryError};
use crate::{RouteId, StopEventId, StopId, StopIndex, TripId};

/// Indexed representation of stops, routes, trips, stop events and the
/// transfer graph, shared immutably by all query engines.
///
/// Trips are numbered route by route, stop events trip by trip, so every
/// lookup below is a direct array access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripBasedData {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    /// Concatenated stop sequences of all routes.
    pub route_stops: Vec<StopId>,
    /// Per-stop route occurrences, CSR-indexed through [`Stop`].
    pub stop_routes: Vec<RouteSegment>,
    pub route_of_trip: Vec<RouteId>,
    /// First stop event of each trip, with a terminator at `num_trips`.
    pub first_stop_event_of_trip: Vec<StopEventId>,
    pub trip_of_stop_event: Vec<TripId>,
    pub index_of_stop_event: Vec<StopIndex>,
    pub events: Vec<ArrivalEvent>,
    /// Directed trip-to-trip transfer edges between stop events.
    pub event_graph: StaticGraph,
    /// Stop-to-stop walking edges.
    pub transfer_graph: StaticGraph,
    pub num_partitions: usize,
}

impl TripBasedData {
    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn number_of_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn number_of_trips(&self) -> usize {
        self.route_of_trip.len()
    }

    pub fn number_of_stop_events(&self) -> usize {
        self.events.len()
    }

    pub fn is_stop(&self, stop: StopId) -> bool {
        stop < self.stops.len()
    }

    pub fn is_trip(&self, trip: TripId) -> bool {
        trip < self.route_of_trip.len()
    }

    pub fn validate_stop(&self, stop: StopId) -> Result<(), QueryError> {
        if self.is_stop(stop) {
            Ok(())
        } else {
            Err(QueryError::InvalidStop)
        }
    }

    pub fn stop_array_of_route(&self, route: RouteId) -> &[StopId] {
        let route = &self.routes[route];
        &self.route_stops[route.stops_start..route.stops_start + route.num_stops]
    }

    pub fn route_length(&self, route: RouteId) -> usize {
        self.routes[route].num_stops
    }

    pub fn first_trip_of_route(&self, route: RouteId) -> TripId {
        self.routes[route].first_trip
    }

    pub fn trips_of_route(&self, route: RouteId) -> Range<TripId> {
        let route = &self.routes[route];
        route.first_trip..route.first_trip + route.num_trips
    }

    /// Route occurrences of `stop`, ordered by route id.
    pub fn routes_containing_stop(&self, stop: StopId) -> &[RouteSegment] {
        let stop = &self.stops[stop];
        &self.stop_routes[stop.routes_start..stop.routes_start + stop.routes_len]
    }

    pub fn stop_of_event(&self, event: StopEventId) -> StopId {
        self.events[event].stop
    }

    pub fn stop_events_of_trip(&self, trip: TripId) -> Range<StopEventId> {
        self.first_stop_event_of_trip[trip]..self.first_stop_event_of_trip[trip + 1]
    }

    pub fn partition_cell(&self, stop: StopId) -> usize {
        self.stops[stop].cell
    }

    /// Departure time of `trip` at `stop_index` of its route.
    pub fn departure_time(&self, trip: TripId, stop_index: StopIndex) -> crate::Time {
        self.events[self.first_stop_event_of_trip[trip] + stop_index].departure
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        crate::binary::save_to(self, path)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        crate::binary::load_from(path)
    }
}
