//! Route departure labels and the per-stop target-label table entries.

use crate::Time;
use crate::model::TripBasedData;
use crate::{StopIndex, TripId};

/// Flattened departure times of one route, laid out as
/// `[stop_index * number_of_trips + trip_offset]` for the incremental
/// lower-bound scan of the initial-transfer evaluation.
#[derive(Debug, Clone)]
pub struct RouteLabel {
    pub number_of_trips: usize,
    pub departure_times: Vec<Time>,
}

impl RouteLabel {
    /// Number of stop indices covered by the label.
    pub fn end(&self) -> StopIndex {
        self.departure_times.len() / self.number_of_trips
    }

    pub fn departure(&self, stop_index: StopIndex, trip_offset: usize) -> Time {
        self.departure_times[stop_index * self.number_of_trips + trip_offset]
    }
}

/// Builds one [`RouteLabel`] per route. Done once per dataset.
pub fn build_route_labels(data: &TripBasedData) -> Vec<RouteLabel> {
    let mut labels = Vec::with_capacity(data.number_of_routes());
    for route in 0..data.number_of_routes() {
        let number_of_trips = data.routes[route].num_trips;
        let length = data.route_length(route);
        let mut departure_times = vec![0 as Time; length * number_of_trips];
        for (offset, trip) in data.trips_of_route(route).enumerate() {
            for index in 0..length {
                departure_times[index * number_of_trips + offset] =
                    data.departure_time(trip, index);
            }
        }
        labels.push(RouteLabel {
            number_of_trips,
            departure_times,
        });
    }
    labels
}

/// One Pareto entry of the per-stop, per-round profile frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLabel {
    pub arrival: Time,
    pub departure: Time,
}

impl Default for TargetLabel {
    fn default() -> Self {
        TargetLabel {
            arrival: Time::MAX,
            departure: Time::MAX,
        }
    }
}

/// The table maps trips back to their predecessor on the same route; the
/// first trip of a route maps to itself.
pub fn build_previous_trip_lookup(data: &TripBasedData) -> Vec<TripId> {
    let mut lookup = vec![0; data.number_of_trips()];
    for route in 0..data.number_of_routes() {
        let first = data.first_trip_of_route(route);
        for trip in data.trips_of_route(route) {
            lookup[trip] = if trip == first { trip } else { trip - 1 };
        }
    }
    lookup
}
