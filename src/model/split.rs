//! Reorganisation of the stop-event graph into local and transfer edges.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::data::TripBasedData;
use crate::{EdgeId, StopEventId, Time};

/// The stop-event graph split into two CSR adjacency arrays: "local" edges
/// stay at the arrival stop (platform waits), "transfer" edges walk to a
/// different stop and carry the walking time.
///
/// Every source-graph edge lands in exactly one of the two classes; the
/// relative edge order within a vertex is preserved. Flags produced by the
/// arc-flag preprocessing address edges through the unified index space
/// `[0, num_local_edges + num_transfer_edges)` with transfer edges offset
/// by `num_local_edges`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitEventGraph {
    to_adj_local: Vec<usize>,
    to_adj_transfer: Vec<usize>,
    pub to_local_vertex: Vec<StopEventId>,
    pub to_transfer_vertex: Vec<StopEventId>,
    /// Source-graph edge id of each local edge.
    pub original_local_edge: Vec<EdgeId>,
    /// Source-graph edge id of each transfer edge.
    pub original_transfer_edge: Vec<EdgeId>,
    /// Walking time of each transfer edge.
    pub transfer_time: Vec<Time>,
    num_vertices: usize,
}

impl SplitEventGraph {
    /// Classifies every stop-event-graph edge in one linear sweep.
    pub fn new(data: &TripBasedData) -> Self {
        let num_vertices = data.number_of_stop_events();
        let num_edges = data.event_graph.num_edges();

        let mut split = SplitEventGraph {
            to_adj_local: vec![0; num_vertices + 1],
            to_adj_transfer: vec![0; num_vertices + 1],
            to_local_vertex: Vec::with_capacity(num_edges),
            to_transfer_vertex: Vec::with_capacity(num_edges),
            original_local_edge: Vec::with_capacity(num_edges),
            original_transfer_edge: Vec::with_capacity(num_edges),
            transfer_time: Vec::with_capacity(num_edges),
            num_vertices,
        };

        let mut running_local = 0;
        let mut running_transfer = 0;
        for from in 0..num_vertices {
            split.to_adj_local[from] = running_local;
            split.to_adj_transfer[from] = running_transfer;

            let from_stop = data.stop_of_event(from);
            for edge in data.event_graph.edges_from(from) {
                let to_vertex = data.event_graph.head(edge);
                if from_stop == data.stop_of_event(to_vertex) {
                    running_local += 1;
                    split.to_local_vertex.push(to_vertex);
                    split.original_local_edge.push(edge);
                } else {
                    running_transfer += 1;
                    split.to_transfer_vertex.push(to_vertex);
                    split.original_transfer_edge.push(edge);
                    split.transfer_time.push(data.event_graph.travel_time(edge));
                }
            }
        }
        split.to_adj_local[num_vertices] = running_local;
        split.to_adj_transfer[num_vertices] = running_transfer;
        split
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_local_edges(&self) -> usize {
        self.to_local_vertex.len()
    }

    pub fn num_transfer_edges(&self) -> usize {
        self.to_transfer_vertex.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_local_edges() + self.num_transfer_edges()
    }

    pub fn is_vertex(&self, vertex: StopEventId) -> bool {
        vertex < self.num_vertices
    }

    /// Local-edge ids leaving `vertex`.
    pub fn local_edges_from(&self, vertex: StopEventId) -> Range<usize> {
        self.to_adj_local[vertex]..self.to_adj_local[vertex + 1]
    }

    /// Transfer-edge ids leaving `vertex`, before the unified-index offset.
    pub fn transfer_edges_from(&self, vertex: StopEventId) -> Range<usize> {
        self.to_adj_transfer[vertex]..self.to_adj_transfer[vertex + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimetableBuilder;

    fn mixed_net() -> TripBasedData {
        // R0: A -> B -> C, R1: B -> D. Changing at B onto R1 is a local
        // edge; walking B -> A and reboarding R0's later trip at A is a
        // transfer edge.
        let mut builder = TimetableBuilder::new(4);
        builder
            .add_route(
                &[0, 1, 2],
                &[
                    vec![(0, 0), (300, 360), (600, 600)],
                    vec![(600, 600), (900, 960), (1200, 1200)],
                ],
            )
            .add_route(&[1, 3], &[vec![(500, 500), (800, 800)]])
            .add_walk(1, 0, 120);
        builder.build().unwrap()
    }

    #[test]
    fn every_edge_lands_in_exactly_one_class() {
        let data = mixed_net();
        let split = SplitEventGraph::new(&data);

        assert_eq!(split.num_edges(), data.event_graph.num_edges());
        assert_eq!(
            split.transfer_time.len(),
            split.num_transfer_edges(),
            "every transfer edge carries a walking time"
        );

        for edge in 0..split.num_local_edges() {
            let original = split.original_local_edge[edge];
            assert!(!split.original_transfer_edge.contains(&original));
        }

        // Classification matches the stop equality of the endpoints.
        for vertex in 0..split.num_vertices() {
            for edge in split.local_edges_from(vertex) {
                assert_eq!(
                    data.stop_of_event(vertex),
                    data.stop_of_event(split.to_local_vertex[edge])
                );
            }
            for edge in split.transfer_edges_from(vertex) {
                assert_ne!(
                    data.stop_of_event(vertex),
                    data.stop_of_event(split.to_transfer_vertex[edge])
                );
            }
        }
    }

    #[test]
    fn ranges_cover_all_edges_in_order() {
        let data = mixed_net();
        let split = SplitEventGraph::new(&data);

        let mut seen_local = 0;
        let mut seen_transfer = 0;
        for vertex in 0..split.num_vertices() {
            let local = split.local_edges_from(vertex);
            assert_eq!(local.start, seen_local);
            seen_local = local.end;
            let transfer = split.transfer_edges_from(vertex);
            assert_eq!(transfer.start, seen_transfer);
            seen_transfer = transfer.end;
        }
        assert_eq!(seen_local, split.num_local_edges());
        assert_eq!(seen_transfer, split.num_transfer_edges());
    }

    #[test]
    fn both_classes_are_present_with_expected_targets() {
        let data = mixed_net();
        let split = SplitEventGraph::new(&data);
        assert_eq!(split.num_local_edges(), 1);
        assert_eq!(split.num_transfer_edges(), 1);

        // Arriving at B on trip 0 at 05:00 boards route 1 at B (local) or
        // walks back to A and reboards trip 1 of route 0 (transfer, 2 min).
        let event_at_b = data.first_stop_event_of_trip[0] + 1;
        let locals: Vec<_> = split
            .local_edges_from(event_at_b)
            .map(|e| split.to_local_vertex[e])
            .collect();
        assert_eq!(locals, vec![data.first_stop_event_of_trip[2]]);

        let transfers: Vec<_> = split
            .transfer_edges_from(event_at_b)
            .map(|e| (split.to_transfer_vertex[e], split.transfer_time[e]))
            .collect();
        assert_eq!(transfers, vec![(data.first_stop_event_of_trip[1], 120)]);
    }
}
