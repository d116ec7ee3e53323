//! The canonical one-to-all profile search over the stop-event graph.
//!
//! One instance owns the transient state for processing a single source
//! stop at a time: the trip-label queue, both reached-index stores, the
//! per-round target labels and the parent tables used to unwind journeys.
//! The dataset, split graph and route labels are shared immutably.

use fixedbitset::FixedBitSet;

use super::IndexedSet;
use super::labels::{RouteLabel, TargetLabel, build_previous_trip_lookup};
use super::parents::{RoundTable, StopParent, TripParent};
use super::reached::{ProfileReachedIndex, ReachedIndex};
use crate::error::QueryError;
use crate::model::types::DepartureAnchor;
use crate::model::{SplitEventGraph, TripBasedData};
use crate::preprocessing::EdgeFlags;
use crate::{MAX_ROUNDS, NO_EDGE, SECONDS_PER_DAY, StopEventId, StopId, Time, TripId};

/// A queued trip segment: the events `[begin, end)` still to be scanned
/// and the queue position the segment was reached from.
#[derive(Debug, Clone, Copy)]
struct TripLabel {
    begin: StopEventId,
    end: StopEventId,
    #[allow(dead_code)]
    parent: usize,
}

const NO_PARENT: usize = usize::MAX;

/// Precomputed per-edge boarding data: the event after the boarded one,
/// the boarded trip and its first event.
#[derive(Debug, Clone, Copy)]
struct EdgeLabel {
    stop_event: StopEventId,
    trip: TripId,
    first_event: StopEventId,
}

pub struct OneToAllProfile<'a> {
    data: &'a TripBasedData,
    split: &'a SplitEventGraph,
    route_labels: &'a [RouteLabel],
    previous_trip: Vec<TripId>,
    edge_labels: Vec<EdgeLabel>,
    transfer_from_source: Vec<Time>,
    last_source: StopId,
    reached_routes: IndexedSet,
    queue: Vec<TripLabel>,
    run_reached: ReachedIndex,
    profile_reached: ProfileReachedIndex,
    target_labels: Vec<TargetLabel>,
    target_changed: FixedBitSet,
    stops_to_update: IndexedSet,
    parent_of_trip: RoundTable<TripParent>,
    parent_of_stop: RoundTable<StopParent>,
    source: StopId,
}

impl<'a> OneToAllProfile<'a> {
    pub fn new(
        data: &'a TripBasedData,
        split: &'a SplitEventGraph,
        route_labels: &'a [RouteLabel],
    ) -> Self {
        debug_assert_eq!(split.num_edges(), data.event_graph.num_edges());

        // Unified edge index: local edges first, then transfer edges.
        let mut edge_labels = Vec::with_capacity(split.num_edges());
        for &board_event in split
            .to_local_vertex
            .iter()
            .chain(&split.to_transfer_vertex)
        {
            let trip = data.trip_of_stop_event[board_event];
            edge_labels.push(EdgeLabel {
                stop_event: board_event + 1,
                trip,
                first_event: data.first_stop_event_of_trip[trip],
            });
        }

        OneToAllProfile {
            data,
            split,
            route_labels,
            previous_trip: build_previous_trip_lookup(data),
            edge_labels,
            transfer_from_source: vec![Time::MAX; data.number_of_stops()],
            last_source: 0,
            reached_routes: IndexedSet::new(data.number_of_routes()),
            queue: Vec::with_capacity(data.number_of_stop_events()),
            run_reached: ReachedIndex::new(data),
            profile_reached: ProfileReachedIndex::new(data),
            target_labels: vec![TargetLabel::default(); data.number_of_stops() * MAX_ROUNDS],
            target_changed: FixedBitSet::with_capacity(data.number_of_stops() * MAX_ROUNDS),
            stops_to_update: IndexedSet::new(data.number_of_stops()),
            parent_of_trip: RoundTable::new(
                MAX_ROUNDS + 1,
                data.number_of_trips(),
                TripParent::invalid(),
            ),
            parent_of_stop: RoundTable::new(
                MAX_ROUNDS,
                data.number_of_stops(),
                StopParent::invalid(),
            ),
            source: 0,
        }
    }

    /// Sweeps all departures of `anchors` (grouped by equal departure time,
    /// latest group first), flagging every edge used by an optimal journey
    /// with the partition cell of the journey's target.
    pub fn run(
        &mut self,
        source: StopId,
        anchors: &[DepartureAnchor],
        flags: &mut EdgeFlags,
    ) -> Result<(), QueryError> {
        self.data.validate_stop(source)?;
        self.source = source;

        self.reset();
        self.compute_initial_and_final_transfers();

        // Journeys whose earliest departure falls on the following service
        // day are captured by one query anchored at the midnight roll-over.
        self.midnight_rollover_query(flags);

        let mut i = 0;
        while i < anchors.len() {
            self.clear();
            let departure = anchors[i].departure;
            let mut j = i;
            while j < anchors.len() && anchors[j].departure == departure {
                self.enqueue_initial(anchors[j].trip, anchors[j].stop_index + 1);
                j += 1;
            }
            self.scan_trips(departure);
            self.flag_updated_stops(flags);
            i = j;
        }
        Ok(())
    }

    /// The Pareto entry of `stop` for journeys with `round` trips, from the
    /// most recent [`run`](Self::run).
    pub fn target_label(&self, stop: StopId, round: usize) -> TargetLabel {
        self.target_labels[stop * MAX_ROUNDS + round]
    }

    fn set_target_label(&mut self, stop: StopId, round: usize, label: TargetLabel) {
        self.target_labels[stop * MAX_ROUNDS + round] = label;
    }

    fn is_changed(&self, stop: StopId, round: usize) -> bool {
        self.target_changed.contains(stop * MAX_ROUNDS + round)
    }

    fn reset(&mut self) {
        self.profile_reached.clear();
        self.target_labels.fill(TargetLabel::default());
        self.clear();
    }

    /// Clears the per-departure-group state, keeping profile reached
    /// indices and target labels.
    fn clear(&mut self) {
        self.queue.clear();
        self.run_reached.clear();
        self.target_changed.clear();
        self.stops_to_update.clear();
    }

    /// Resets the entries touched by the previous source, then records the
    /// walking times out of the current source.
    fn compute_initial_and_final_transfers(&mut self) {
        let data = self.data;
        self.transfer_from_source[self.last_source] = Time::MAX;
        for edge in data.transfer_graph.edges_from(self.last_source) {
            self.transfer_from_source[data.transfer_graph.head(edge)] = Time::MAX;
        }
        self.transfer_from_source[self.source] = 0;
        for edge in data.transfer_graph.edges_from(self.source) {
            self.transfer_from_source[data.transfer_graph.head(edge)] =
                data.transfer_graph.travel_time(edge);
        }
        self.last_source = self.source;
    }

    fn midnight_rollover_query(&mut self, flags: &mut EdgeFlags) {
        self.evaluate_initial_transfers();
        self.scan_trips(SECONDS_PER_DAY);
        self.flag_updated_stops(flags);
    }

    /// Enqueues, for every route touched by the source or its walking
    /// neighbours, the earliest trip catchable when leaving the source at
    /// the midnight roll-over.
    fn evaluate_initial_transfers(&mut self) {
        let data = self.data;
        let route_labels = self.route_labels;

        self.reached_routes.clear();
        for segment in data.routes_containing_stop(self.source) {
            self.reached_routes.insert(segment.route);
        }
        for edge in data.transfer_graph.edges_from(self.source) {
            let stop = data.transfer_graph.head(edge);
            for segment in data.routes_containing_stop(stop) {
                self.reached_routes.insert(segment.route);
            }
        }
        self.reached_routes.sort();

        for position in 0..self.reached_routes.len() {
            let route = self.reached_routes.get(position);
            let label = &route_labels[route];
            let end_index = label.end();
            let first_trip = data.first_trip_of_route(route);
            let stops = data.stop_array_of_route(route);
            let num_trips = label.number_of_trips;

            // Incremental lower bound over the flattened departure times:
            // walking forward over the stop sequence, the boardable trip
            // can only move to earlier trips.
            let mut trip_offset = usize::MAX;
            for stop_index in 0..end_index {
                let time_from_source = self.transfer_from_source[stops[stop_index]];
                if time_from_source == Time::MAX {
                    continue;
                }
                let stop_departure = SECONDS_PER_DAY + time_from_source;
                let label_index = stop_index * num_trips;
                if trip_offset >= num_trips {
                    trip_offset = label.departure_times[label_index..label_index + num_trips]
                        .partition_point(|&time| time < stop_departure);
                    if trip_offset >= num_trips {
                        continue;
                    }
                } else {
                    if label.departure_times[label_index + trip_offset - 1] < stop_departure {
                        continue;
                    }
                    trip_offset -= 1;
                    while trip_offset > 0
                        && label.departure_times[label_index + trip_offset - 1] >= stop_departure
                    {
                        trip_offset -= 1;
                    }
                }
                self.enqueue_initial(first_trip + trip_offset, stop_index + 1);
                if trip_offset == 0 {
                    break;
                }
            }
        }
    }

    /// The round-by-round BFS over the stop-event graph.
    fn scan_trips(&mut self, departure_time: Time) {
        let data = self.data;
        let split = self.split;

        let mut round_begin = 0;
        let mut round_end = self.queue.len();
        let mut round = 1;

        while round_begin < round_end && round < MAX_ROUNDS {
            // Sequential access to the arrival events dominates the scan;
            // sort the fresh segment accordingly.
            self.queue[round_begin..round_end].sort_by_key(|label| (label.begin, label.end));

            // Arrivals reached by staying seated.
            for i in round_begin..round_end {
                let label = self.queue[i];
                let trip = data.trip_of_stop_event[label.begin];
                for event in label.begin..label.end {
                    let record = data.events[event];
                    self.add_arrival(
                        record.stop,
                        record.arrival,
                        departure_time,
                        round,
                        trip,
                        event,
                    );
                }
            }

            // Arrivals reached by walking on from the arrival stop.
            for i in round_begin..round_end {
                let label = self.queue[i];
                let trip = data.trip_of_stop_event[label.begin];
                for event in label.begin..label.end {
                    let record = data.events[event];
                    for edge in data.transfer_graph.edges_from(record.stop) {
                        let to_stop = data.transfer_graph.head(edge);
                        let arrival = record
                            .arrival
                            .saturating_add(data.transfer_graph.travel_time(edge));
                        self.add_arrival(to_stop, arrival, departure_time, round, trip, event);
                    }
                }
            }

            // Trip-to-trip transfers along local edges.
            for i in round_begin..round_end {
                let label = self.queue[i];
                for event in label.begin..label.end {
                    let record = data.events[event];
                    if record.arrival > self.target_label(record.stop, round).arrival {
                        continue;
                    }
                    for edge in split.local_edges_from(event) {
                        self.enqueue_edge(edge, i, round, event, true);
                    }
                }
            }

            // Trip-to-trip transfers along walking edges; the walking time
            // takes part in the arrival-time prune.
            let offset = split.num_local_edges();
            for i in round_begin..round_end {
                let label = self.queue[i];
                for event in label.begin..label.end {
                    let record = data.events[event];
                    if record.arrival > self.target_label(record.stop, round).arrival {
                        continue;
                    }
                    for edge in split.transfer_edges_from(event) {
                        let board_event = split.to_transfer_vertex[edge];
                        let arrival = record.arrival.saturating_add(split.transfer_time[edge]);
                        if arrival > self.target_label(data.stop_of_event(board_event), round).arrival
                        {
                            continue;
                        }
                        self.enqueue_edge(offset + edge, i, round, event, false);
                    }
                }
            }

            round_begin = round_end;
            round_end = self.queue.len();
            round += 1;
        }
    }

    /// The candidate `(trip, index)` is dominated and must not be queued.
    fn discard(&self, trip: TripId, index: usize, round: usize) -> bool {
        if self.run_reached.already_reached(trip, index) {
            return true;
        }
        if self.profile_reached.get(trip, 1) < index {
            return true;
        }
        if round > 1 && self.profile_reached.already_reached(trip, index, round) {
            return true;
        }
        // A strictly earlier trip of the same route that got at least this
        // far in the next round dominates any extension via this trip.
        let previous = self.previous_trip[trip];
        previous != trip && self.profile_reached.already_reached(previous, index, round + 1)
    }

    /// First-round enqueue of a departure anchor.
    fn enqueue_initial(&mut self, trip: TripId, index: usize) {
        if self.discard(trip, index, 1) {
            return;
        }
        let first_event = self.data.first_stop_event_of_trip[trip];
        self.queue.push(TripLabel {
            begin: first_event + index,
            end: first_event + self.run_reached.get(trip),
            parent: NO_PARENT,
        });
        debug_assert!(
            self.queue.len() <= self.data.number_of_stop_events(),
            "trip-label queue overflow"
        );
        self.run_reached.update(trip, index);
        self.profile_reached.update(trip, index, 1);
        self.parent_of_trip.set(
            1,
            trip,
            TripParent {
                from_stop: self.data.stop_of_event(first_event + index - 1),
                edge: NO_EDGE,
                is_local: false,
            },
        );
    }

    /// Enqueues the trip segment entered through the given split-graph
    /// edge (unified index).
    fn enqueue_edge(
        &mut self,
        edge: usize,
        parent: usize,
        round: usize,
        from_event: StopEventId,
        is_local: bool,
    ) {
        let label = self.edge_labels[edge];
        let index = label.stop_event - label.first_event;
        if self.discard(label.trip, index, round) {
            return;
        }
        let from_stop = self.data.stop_of_event(from_event);
        self.queue.push(TripLabel {
            begin: label.stop_event,
            end: label.first_event + self.run_reached.get(label.trip),
            parent,
        });
        debug_assert!(
            self.queue.len() <= self.data.number_of_stop_events(),
            "trip-label queue overflow"
        );
        self.run_reached.update(label.trip, index);
        self.profile_reached.update(label.trip, index, round + 1);
        self.parent_of_trip.set(
            round + 1,
            label.trip,
            TripParent {
                from_stop,
                edge,
                is_local,
            },
        );
    }

    /// Updates the target label of `stop` at `round` if the arrival
    /// dominates both the current entry and the previous round's.
    fn add_arrival(
        &mut self,
        stop: StopId,
        new_arrival: Time,
        new_departure: Time,
        round: usize,
        trip: TripId,
        event: StopEventId,
    ) {
        let current = self.target_label(stop, round);
        let mut prune = new_arrival == current.arrival && current.departure == new_departure;
        prune |= new_arrival > current.arrival;
        prune |= round > 0 && new_arrival >= self.target_label(stop, round - 1).arrival;
        if prune {
            return;
        }

        self.set_target_label(
            stop,
            round,
            TargetLabel {
                arrival: new_arrival,
                departure: new_departure,
            },
        );
        self.target_changed.set(stop * MAX_ROUNDS + round, true);
        self.stops_to_update.insert(stop);

        // Monotonise the later rounds: more trips never arrive later.
        for later in round + 1..MAX_ROUNDS {
            let label = self.target_label(stop, later);
            if label.arrival > new_arrival {
                self.set_target_label(
                    stop,
                    later,
                    TargetLabel {
                        arrival: new_arrival,
                        departure: new_departure,
                    },
                );
            }
        }

        let begin = self.run_reached.get(trip) - 1;
        let end = self.data.index_of_stop_event[event];
        debug_assert!(begin <= end, "invalid trip segment in stop parent");
        self.parent_of_stop.set(round, stop, StopParent { trip, begin, end });
    }

    fn flag_updated_stops(&self, flags: &mut EdgeFlags) {
        for &stop in self.stops_to_update.as_slice() {
            self.unwind_journeys(stop, flags);
        }
    }

    /// Walks the Pareto entries of `target` from few to many trips and
    /// unwinds every strictly improving journey.
    fn unwind_journeys(&self, target: StopId, flags: &mut EdgeFlags) {
        let cell = self.data.partition_cell(target);
        let mut best_arrival = Time::MAX;
        for round in 1..MAX_ROUNDS {
            if !self.is_changed(target, round) {
                continue;
            }
            let label = self.target_label(target, round);
            if label.arrival >= best_arrival {
                continue;
            }
            best_arrival = label.arrival;
            self.unwind(target, round, cell, flags);
        }
    }

    /// Follows the parent tables back to the first round, flagging the
    /// transfer edge of every intermediate trip with the target's cell.
    /// Terminates after at most MAX_ROUNDS - 1 steps because each step
    /// decrements the round.
    fn unwind(&self, target: StopId, round: usize, cell: usize, flags: &mut EdgeFlags) {
        let mut stop = target;
        let mut round = round;
        while round > 1 {
            let stop_parent = self.parent_of_stop.get(round, stop);
            debug_assert!(self.data.is_trip(stop_parent.trip));
            debug_assert!(stop_parent.begin <= stop_parent.end);
            let trip_parent = self.parent_of_trip.get(round, stop_parent.trip);
            debug_assert_ne!(trip_parent.edge, NO_EDGE);
            flags.set(trip_parent.edge, cell);
            stop = trip_parent.from_stop;
            debug_assert!(self.data.is_stop(stop));
            round -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimetableBuilder;
    use crate::routing::labels::build_route_labels;

    fn run_profile(data: &TripBasedData, source: StopId) -> (EdgeFlags, Vec<TargetLabel>) {
        let split = SplitEventGraph::new(data);
        let route_labels = build_route_labels(data);
        let anchors = crate::preprocessing::collect_departure_anchors(data);
        let mut search = OneToAllProfile::new(data, &split, &route_labels);
        let mut flags = EdgeFlags::new(split.num_edges(), data.num_partitions);
        search.run(source, &anchors[source], &mut flags).unwrap();

        let mut labels = Vec::new();
        for stop in 0..data.number_of_stops() {
            for round in 0..MAX_ROUNDS {
                labels.push(search.target_label(stop, round));
            }
        }
        (flags, labels)
    }

    fn transfer_net() -> TripBasedData {
        // R0: A -> B, R1: B -> C; the change at B is the only split edge.
        let mut builder = TimetableBuilder::new(3);
        builder
            .add_route(&[0, 1], &[vec![(0, 0), (300, 300)]])
            .add_route(&[1, 2], &[vec![(600, 600), (1200, 1200)]])
            .set_partition(&[0, 0, 1]);
        builder.build().unwrap()
    }

    fn three_leg_net() -> TripBasedData {
        let mut builder = TimetableBuilder::new(4);
        builder
            .add_route(&[0, 1], &[vec![(0, 0), (300, 300)]])
            .add_route(&[1, 2], &[vec![(600, 600), (900, 900)]])
            .add_route(&[2, 3], &[vec![(1200, 1200), (1500, 1500)]])
            .set_partition(&[0, 0, 0, 1]);
        builder.build().unwrap()
    }

    #[test]
    fn transfer_edge_is_flagged_with_target_cell() {
        let data = transfer_net();
        let (flags, _) = run_profile(&data, 0);
        assert_eq!(flags.num_edges(), 1);
        assert!(flags.is_set(0, 1), "journey to C rides the change at B");
        assert!(!flags.is_set(0, 0), "no cell-0 target uses the change");
    }

    #[test]
    fn repeated_runs_yield_identical_flags() {
        let data = transfer_net();
        let split = SplitEventGraph::new(&data);
        let route_labels = build_route_labels(&data);
        let anchors = crate::preprocessing::collect_departure_anchors(&data);
        let mut search = OneToAllProfile::new(&data, &split, &route_labels);

        let mut first = EdgeFlags::new(split.num_edges(), data.num_partitions);
        search.run(0, &anchors[0], &mut first).unwrap();
        let mut second = EdgeFlags::new(split.num_edges(), data.num_partitions);
        search.run(0, &anchors[0], &mut second).unwrap();
        assert_eq!(first, second);

        // Re-flagging is a union with itself.
        let merged = first.clone().merged(second);
        assert_eq!(merged, first);
    }

    #[test]
    fn unwinding_flags_every_leg_of_a_long_journey() {
        let data = three_leg_net();
        let (flags, _) = run_profile(&data, 0);
        assert_eq!(flags.num_edges(), 2);
        // Both changes lie on the optimal journey to D (cell 1).
        assert_eq!(flags.count_ones(1), 2);
        // C (cell 0) is reached through the first change only.
        assert_eq!(flags.count_ones(0), 1);
    }

    #[test]
    fn profile_records_earliest_arrivals_per_round() {
        let data = three_leg_net();
        let (_, labels) = run_profile(&data, 0);
        // B is reached with one trip, C with two, D with three.
        assert_eq!(labels[1 * MAX_ROUNDS + 1].arrival, 300);
        assert_eq!(labels[2 * MAX_ROUNDS + 1].arrival, Time::MAX);
        assert_eq!(labels[2 * MAX_ROUNDS + 2].arrival, 900);
        assert_eq!(labels[3 * MAX_ROUNDS + 3].arrival, 1500);
        // All departures leave the source at 00:00.
        assert_eq!(labels[3 * MAX_ROUNDS + 3].departure, 0);
    }

    #[test]
    fn target_labels_are_monotone_over_rounds() {
        let data = three_leg_net();
        let (_, labels) = run_profile(&data, 0);
        for stop in 0..data.number_of_stops() {
            for round in 1..MAX_ROUNDS {
                let current = labels[stop * MAX_ROUNDS + round];
                let previous = labels[stop * MAX_ROUNDS + round - 1];
                assert!(
                    current.arrival <= previous.arrival,
                    "stop {stop} round {round} got worse"
                );
            }
        }
    }

    #[test]
    fn dominated_transfer_is_never_flagged() {
        // A direct trip beats the two-trip alternative to C.
        let mut builder = TimetableBuilder::new(3);
        builder
            .add_route(&[0, 1, 2], &[vec![(0, 0), (300, 300), (600, 600)]])
            .add_route(&[1, 2], &[vec![(400, 400), (2000, 2000)]])
            .set_partition(&[0, 0, 1]);
        let data = builder.build().unwrap();
        let (flags, _) = run_profile(&data, 0);
        assert_eq!(flags.num_edges(), 1);
        for cell in 0..data.num_partitions {
            assert_eq!(flags.count_ones(cell), 0);
        }
    }

    #[test]
    fn midnight_rollover_captures_next_day_journeys() {
        // Both trips run after the midnight roll-over, so the dedicated EA
        // query is the only path that can flag the change at B.
        let mut builder = TimetableBuilder::new(3);
        builder
            .add_route(&[0, 1], &[vec![(86_460, 86_460), (86_760, 86_760)]])
            .add_route(&[1, 2], &[vec![(87_000, 87_000), (87_300, 87_300)]])
            .set_partition(&[0, 0, 1]);
        let data = builder.build().unwrap();

        let anchors = crate::preprocessing::collect_departure_anchors(&data);
        assert!(anchors[0].is_empty());

        let (flags, labels) = run_profile(&data, 0);
        assert!(flags.is_set(0, 1));
        assert_eq!(labels[2 * MAX_ROUNDS + 2].arrival, 87_300);
        assert_eq!(labels[2 * MAX_ROUNDS + 2].departure, SECONDS_PER_DAY);
    }

    #[test]
    fn source_equals_target_leaves_flags_empty() {
        let data = transfer_net();
        let split = SplitEventGraph::new(&data);
        let route_labels = build_route_labels(&data);
        let anchors = crate::preprocessing::collect_departure_anchors(&data);
        let mut search = OneToAllProfile::new(&data, &split, &route_labels);
        let mut flags = EdgeFlags::new(split.num_edges(), data.num_partitions);
        // A network seen from C: nothing departs, nothing is flagged.
        search.run(2, &anchors[2], &mut flags).unwrap();
        for cell in 0..data.num_partitions {
            assert_eq!(flags.count_ones(cell), 0);
        }
    }

    #[test]
    fn single_stop_route_is_a_no_op() {
        let mut builder = TimetableBuilder::new(2);
        builder
            .add_route(&[0], &[vec![(300, 300)]])
            .add_route(&[1], &[vec![(600, 600)]]);
        let data = builder.build().unwrap();
        assert_eq!(data.event_graph.num_edges(), 0);

        let (flags, labels) = run_profile(&data, 0);
        for cell in 0..data.num_partitions {
            assert_eq!(flags.count_ones(cell), 0);
        }
        assert!(labels.iter().all(|label| label.arrival == Time::MAX));
    }

    #[test]
    fn round_cap_bounds_long_journeys() {
        // A chain needing one trip per leg: stops past leg 15 stay out of
        // reach of the capped search, with no out-of-bounds access.
        let mut builder = TimetableBuilder::new(18);
        for i in 0..17u32 {
            let dep = 600 * i;
            builder.add_route(
                &[i as usize, i as usize + 1],
                &[vec![(dep, dep), (dep + 300, dep + 300)]],
            );
        }
        let data = builder.build().unwrap();
        let (_, labels) = run_profile(&data, 0);

        // Stop 15 needs 15 trips and is still reached.
        assert_eq!(labels[15 * MAX_ROUNDS + 15].arrival, 600 * 14 + 300);
        // Stops needing 16 or more trips are beyond the round cap.
        assert!(labels[16 * MAX_ROUNDS..].iter().all(|l| l.arrival == Time::MAX));
    }

    #[test]
    fn invalid_source_is_rejected() {
        let data = transfer_net();
        let split = SplitEventGraph::new(&data);
        let route_labels = build_route_labels(&data);
        let mut search = OneToAllProfile::new(&data, &split, &route_labels);
        let mut flags = EdgeFlags::new(split.num_edges(), data.num_partitions);
        assert_eq!(
            search.run(99, &[], &mut flags),
            Err(QueryError::InvalidStop)
        );
    }
}
