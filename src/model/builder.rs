//! Programmatic construction of a [`TripBasedData`] instance.

use log::info;

use super::data::TripBasedData;
use super::graph::StaticGraph;
use super::types::{ArrivalEvent, Route, RouteSegment, Stop};
use crate::error::Error;
use crate::{MAX_PARTITIONS, StopId, StopIndex, Time, TripId};

struct RouteSpec {
    stops: Vec<StopId>,
    /// Per trip, one (arrival, departure) pair per stop of the route.
    trips: Vec<Vec<(Time, Time)>>,
}

/// Assembles the flat dataset arrays from route stop sequences, trip times,
/// walking edges and a partition assignment, and derives the trip-to-trip
/// stop-event graph.
///
/// Route sequences must be FIFO: at every stop index, departure times must
/// not decrease across a route's trips.
pub struct TimetableBuilder {
    num_stops: usize,
    routes: Vec<RouteSpec>,
    walks: Vec<(StopId, StopId, Time)>,
    cells: Option<Vec<usize>>,
}

impl TimetableBuilder {
    pub fn new(num_stops: usize) -> Self {
        TimetableBuilder {
            num_stops,
            routes: Vec::new(),
            walks: Vec::new(),
            cells: None,
        }
    }

    /// Adds a route with the given stop sequence and one time row per trip.
    pub fn add_route(&mut self, stops: &[StopId], trips: &[Vec<(Time, Time)>]) -> &mut Self {
        self.routes.push(RouteSpec {
            stops: stops.to_vec(),
            trips: trips.to_vec(),
        });
        self
    }

    /// Adds a directed walking edge.
    pub fn add_walk(&mut self, from: StopId, to: StopId, duration: Time) -> &mut Self {
        self.walks.push((from, to, duration));
        self
    }

    /// Assigns one partition cell per stop. Defaults to a single cell.
    pub fn set_partition(&mut self, cells: &[usize]) -> &mut Self {
        self.cells = Some(cells.to_vec());
        self
    }

    pub fn build(&self) -> Result<TripBasedData, Error> {
        self.validate()?;

        let cells = self
            .cells
            .clone()
            .unwrap_or_else(|| vec![0; self.num_stops]);
        let num_partitions = cells.iter().max().map_or(1, |&max| max + 1);

        // Flatten routes, trips and stop events.
        let mut routes = Vec::with_capacity(self.routes.len());
        let mut route_stops = Vec::new();
        let mut route_of_trip = Vec::new();
        let mut first_stop_event_of_trip = vec![0];
        let mut trip_of_stop_event = Vec::new();
        let mut index_of_stop_event = Vec::new();
        let mut events = Vec::new();

        for (route_id, spec) in self.routes.iter().enumerate() {
            routes.push(Route {
                first_trip: route_of_trip.len(),
                num_trips: spec.trips.len(),
                stops_start: route_stops.len(),
                num_stops: spec.stops.len(),
            });
            route_stops.extend_from_slice(&spec.stops);
            for trip_times in &spec.trips {
                let trip = route_of_trip.len();
                route_of_trip.push(route_id);
                for (index, (&stop, &(arrival, departure))) in
                    spec.stops.iter().zip(trip_times).enumerate()
                {
                    trip_of_stop_event.push(trip);
                    index_of_stop_event.push(index);
                    events.push(ArrivalEvent {
                        stop,
                        arrival,
                        departure,
                    });
                }
                first_stop_event_of_trip.push(events.len());
            }
        }

        // Per-stop route occurrence index, CSR over the stops.
        let mut occurrences: Vec<Vec<RouteSegment>> = vec![Vec::new(); self.num_stops];
        for (route_id, spec) in self.routes.iter().enumerate() {
            for (stop_index, &stop) in spec.stops.iter().enumerate() {
                occurrences[stop].push(RouteSegment {
                    route: route_id,
                    stop_index,
                });
            }
        }
        let mut stops = Vec::with_capacity(self.num_stops);
        let mut stop_routes = Vec::new();
        for (stop, segments) in occurrences.iter().enumerate() {
            stops.push(Stop {
                routes_start: stop_routes.len(),
                routes_len: segments.len(),
                cell: cells[stop],
            });
            stop_routes.extend_from_slice(segments);
        }

        let transfer_graph = StaticGraph::from_edges(self.num_stops, &self.walks);

        let mut data = TripBasedData {
            stops,
            routes,
            route_stops,
            stop_routes,
            route_of_trip,
            first_stop_event_of_trip,
            trip_of_stop_event,
            index_of_stop_event,
            events,
            event_graph: StaticGraph::default(),
            transfer_graph,
            num_partitions,
        };
        data.event_graph = generate_event_graph(&data);

        info!(
            "built trip-based dataset: {} stops, {} routes, {} trips, {} stop events, {} event edges",
            data.number_of_stops(),
            data.number_of_routes(),
            data.number_of_trips(),
            data.number_of_stop_events(),
            data.event_graph.num_edges()
        );
        Ok(data)
    }

    fn validate(&self) -> Result<(), Error> {
        if let Some(cells) = &self.cells {
            if cells.len() != self.num_stops {
                return Err(Error::InvalidData(format!(
                    "partition assigns {} stops, dataset has {}",
                    cells.len(),
                    self.num_stops
                )));
            }
            if cells.iter().any(|&cell| cell >= MAX_PARTITIONS) {
                return Err(Error::InvalidData(format!(
                    "partition cells must lie below {MAX_PARTITIONS}"
                )));
            }
        }
        for &(from, to, _) in &self.walks {
            if from >= self.num_stops || to >= self.num_stops {
                return Err(Error::InvalidData(format!(
                    "walking edge {from} -> {to} references an unknown stop"
                )));
            }
            if from == to {
                return Err(Error::InvalidData(format!(
                    "walking edge at stop {from} is a self loop"
                )));
            }
        }
        for (route_id, spec) in self.routes.iter().enumerate() {
            if spec.stops.is_empty() {
                return Err(Error::InvalidData(format!("route {route_id} has no stops")));
            }
            if spec.stops.len() > u16::MAX as usize {
                return Err(Error::InvalidData(format!("route {route_id} is too long")));
            }
            if let Some(&stop) = spec.stops.iter().find(|&&stop| stop >= self.num_stops) {
                return Err(Error::InvalidData(format!(
                    "route {route_id} references unknown stop {stop}"
                )));
            }
            for (trip, times) in spec.trips.iter().enumerate() {
                if times.len() != spec.stops.len() {
                    return Err(Error::InvalidData(format!(
                        "trip {trip} of route {route_id} has {} stop times, expected {}",
                        times.len(),
                        spec.stops.len()
                    )));
                }
                for (index, &(arrival, departure)) in times.iter().enumerate() {
                    if departure < arrival {
                        return Err(Error::InvalidData(format!(
                            "trip {trip} of route {route_id} departs before it arrives at index {index}"
                        )));
                    }
                    if index > 0 && arrival < times[index - 1].1 {
                        return Err(Error::InvalidData(format!(
                            "trip {trip} of route {route_id} travels backwards in time at index {index}"
                        )));
                    }
                }
            }
            // FIFO order across a route's trips, per stop index.
            for index in 0..spec.stops.len() {
                for trip in 1..spec.trips.len() {
                    if spec.trips[trip][index].1 < spec.trips[trip - 1][index].1 {
                        return Err(Error::InvalidData(format!(
                            "non-monotonic departures on route {route_id} at stop index {index}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Generates the trip-to-trip transfer edges of the stop-event graph.
///
/// From every stop event reached after riding at least one stop, an edge
/// leads to the boarding event of the earliest catchable trip at each
/// (route, stop index) occurrence of the arrival stop and of its walking
/// neighbours. Transfers to the same or a later trip of the own route at an
/// equal-or-later stop index are dominated by staying seated and are not
/// generated.
fn generate_event_graph(data: &TripBasedData) -> StaticGraph {
    let mut edges = Vec::new();
    for trip in 0..data.number_of_trips() {
        let route = data.route_of_trip[trip];
        let length = data.route_length(route);
        for index in 1..length {
            let event = data.first_stop_event_of_trip[trip] + index;
            let arrival = data.events[event].arrival;
            let from_stop = data.events[event].stop;

            collect_boardings(data, trip, index, event, from_stop, arrival, 0, &mut edges);
            for walk in data.transfer_graph.edges_from(from_stop) {
                let to_stop = data.transfer_graph.head(walk);
                let duration = data.transfer_graph.travel_time(walk);
                collect_boardings(data, trip, index, event, to_stop, arrival, duration, &mut edges);
            }
        }
    }
    StaticGraph::from_edges(data.number_of_stop_events(), &edges)
}

#[allow(clippy::too_many_arguments)]
fn collect_boardings(
    data: &TripBasedData,
    from_trip: TripId,
    from_index: StopIndex,
    from_event: usize,
    at_stop: StopId,
    arrival: Time,
    walk: Time,
    edges: &mut Vec<(usize, usize, Time)>,
) {
    let earliest_board = arrival.saturating_add(walk);
    for &RouteSegment { route, stop_index } in data.routes_containing_stop(at_stop) {
        if stop_index + 1 >= data.route_length(route) {
            continue;
        }
        let first = data.first_trip_of_route(route);
        let count = data.routes[route].num_trips;
        // Binary search for the earliest trip departing at or after the
        // transfer arrival; FIFO order across trips makes this valid.
        let mut lo = 0;
        let mut hi = count;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if data.departure_time(first + mid, stop_index) < earliest_board {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo >= count {
            continue;
        }
        let to_trip = first + lo;
        if route == data.route_of_trip[from_trip] && to_trip >= from_trip && stop_index >= from_index
        {
            continue;
        }
        let board_event = data.first_stop_event_of_trip[to_trip] + stop_index;
        edges.push((from_event, board_event, walk));
    }
}
