//! Collection of the per-source departure anchors driving the profile
//! sweep.

use crate::model::TripBasedData;
use crate::model::types::{DepartureAnchor, RouteSegment};
use crate::{SECONDS_PER_DAY, StopId, Time};

/// For every stop, the trips it can board directly or after an initial
/// walk, stamped with the effective departure time from that stop.
///
/// Each list is sorted by descending departure time with equal times
/// adjacent, the order [`OneToAllProfile::run`] consumes groups in.
///
/// [`OneToAllProfile::run`]: crate::routing::OneToAllProfile::run
pub fn collect_departure_anchors(data: &TripBasedData) -> Vec<Vec<DepartureAnchor>> {
    let mut anchors: Vec<Vec<DepartureAnchor>> = vec![Vec::new(); data.number_of_stops()];
    for source in 0..data.number_of_stops() {
        collect_boardable_trips(data, source, 0, &mut anchors[source]);
        for edge in data.transfer_graph.edges_from(source) {
            collect_boardable_trips(
                data,
                data.transfer_graph.head(edge),
                data.transfer_graph.travel_time(edge),
                &mut anchors[source],
            );
        }
        anchors[source].sort_by(|a, b| {
            b.departure
                .cmp(&a.departure)
                .then(a.trip.cmp(&b.trip))
                .then(a.stop_index.cmp(&b.stop_index))
        });
    }
    anchors
}

fn collect_boardable_trips(
    data: &TripBasedData,
    at_stop: StopId,
    walk: Time,
    out: &mut Vec<DepartureAnchor>,
) {
    for &RouteSegment { route, stop_index } in data.routes_containing_stop(at_stop) {
        if stop_index + 1 >= data.route_length(route) {
            continue;
        }
        for trip in data.trips_of_route(route) {
            let departure = data.departure_time(trip, stop_index);
            // The rider must leave the source `walk` seconds earlier.
            if departure < walk {
                continue;
            }
            // Departures at or past the midnight roll-over belong to the
            // dedicated EA query, not to the sweep.
            if departure - walk >= SECONDS_PER_DAY {
                continue;
            }
            out.push(DepartureAnchor {
                trip,
                stop_index,
                departure: departure - walk,
            });
        }
    }
}
