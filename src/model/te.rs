//! Time-expanded view of the stop events, used by the hub-label query.

use serde::{Deserialize, Serialize};

use super::data::TripBasedData;
use crate::{StopEventId, StopId, Time};

/// Per-stop, time-sorted access to departure and arrival events.
///
/// Every stop event owns two vertices of the time-expanded graph: the
/// departure vertex `2 * event` and the arrival vertex `2 * event + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeExpandedData {
    arrival_time: Vec<Time>,
    departure_time: Vec<Time>,
    stop_of_event: Vec<StopId>,
    /// CSR over stops; events sorted by departure time.
    departures_start: Vec<usize>,
    departures: Vec<StopEventId>,
    /// CSR over stops; events sorted by arrival time.
    arrivals_start: Vec<usize>,
    arrivals: Vec<StopEventId>,
}

impl TimeExpandedData {
    pub fn new(data: &TripBasedData) -> Self {
        let num_stops = data.number_of_stops();
        let num_events = data.number_of_stop_events();

        let mut arrival_time = Vec::with_capacity(num_events);
        let mut departure_time = Vec::with_capacity(num_events);
        let mut stop_of_event = Vec::with_capacity(num_events);
        let mut by_stop: Vec<Vec<StopEventId>> = vec![Vec::new(); num_stops];
        for (event, record) in data.events.iter().enumerate() {
            arrival_time.push(record.arrival);
            departure_time.push(record.departure);
            stop_of_event.push(record.stop);
            by_stop[record.stop].push(event);
        }

        let mut departures_start = Vec::with_capacity(num_stops + 1);
        let mut departures = Vec::with_capacity(num_events);
        let mut arrivals_start = Vec::with_capacity(num_stops + 1);
        let mut arrivals = Vec::with_capacity(num_events);
        for events in &by_stop {
            departures_start.push(departures.len());
            let mut sorted = events.clone();
            sorted.sort_by_key(|&event| departure_time[event]);
            departures.extend_from_slice(&sorted);

            arrivals_start.push(arrivals.len());
            sorted.sort_by_key(|&event| arrival_time[event]);
            arrivals.extend_from_slice(&sorted);
        }
        departures_start.push(departures.len());
        arrivals_start.push(arrivals.len());

        TimeExpandedData {
            arrival_time,
            departure_time,
            stop_of_event,
            departures_start,
            departures,
            arrivals_start,
            arrivals,
        }
    }

    pub fn num_events(&self) -> usize {
        self.arrival_time.len()
    }

    pub fn num_stops(&self) -> usize {
        self.departures_start.len() - 1
    }

    pub fn is_stop(&self, stop: StopId) -> bool {
        stop < self.num_stops()
    }

    pub fn is_event(&self, event: StopEventId) -> bool {
        event < self.num_events()
    }

    pub fn stop_of_event(&self, event: StopEventId) -> StopId {
        self.stop_of_event[event]
    }

    pub fn arrival_time(&self, event: StopEventId) -> Time {
        self.arrival_time[event]
    }

    pub fn departure_time(&self, event: StopEventId) -> Time {
        self.departure_time[event]
    }

    /// Events at `stop`, sorted by arrival time.
    pub fn arrivals_of_stop(&self, stop: StopId) -> &[StopEventId] {
        &self.arrivals[self.arrivals_start[stop]..self.arrivals_start[stop + 1]]
    }

    /// The earliest event at `stop` departing at or after `time`.
    pub fn first_reachable_departure(&self, stop: StopId, time: Time) -> Option<StopEventId> {
        let events = &self.departures[self.departures_start[stop]..self.departures_start[stop + 1]];
        let index = events.partition_point(|&event| self.departure_time[event] < time);
        events.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimetableBuilder;

    fn simple_net() -> TripBasedData {
        let mut builder = TimetableBuilder::new(3);
        builder.add_route(
            &[0, 1, 2],
            &[
                vec![(0, 0), (300, 360), (600, 600)],
                vec![(600, 600), (900, 960), (1200, 1200)],
            ],
        );
        builder.build().unwrap()
    }

    #[test]
    fn arrivals_are_sorted_per_stop() {
        let te = TimeExpandedData::new(&simple_net());
        assert_eq!(te.num_events(), 6);
        let arrivals = te.arrivals_of_stop(2);
        assert_eq!(arrivals.len(), 2);
        assert!(te.arrival_time(arrivals[0]) <= te.arrival_time(arrivals[1]));
        assert_eq!(te.arrival_time(arrivals[0]), 600);
        assert_eq!(te.arrival_time(arrivals[1]), 1200);
    }

    #[test]
    fn first_reachable_departure_is_inclusive() {
        let te = TimeExpandedData::new(&simple_net());
        // Departures at stop 1: 06:00 and 16:00.
        let event = te.first_reachable_departure(1, 360).unwrap();
        assert_eq!(te.departure_time(event), 360);
        let event = te.first_reachable_departure(1, 361).unwrap();
        assert_eq!(te.departure_time(event), 960);
        assert_eq!(te.first_reachable_departure(1, 961), None);
    }

    #[test]
    fn stop_without_events_has_no_departures() {
        let mut builder = TimetableBuilder::new(4);
        builder.add_route(&[0, 1], &[vec![(0, 0), (300, 300)]]);
        let te = TimeExpandedData::new(&builder.build().unwrap());
        assert!(te.arrivals_of_stop(3).is_empty());
        assert_eq!(te.first_reachable_departure(3, 0), None);
    }
}
