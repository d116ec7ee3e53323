use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::Time;

/// Static directed graph in CSR form with one travel time per edge.
///
/// Used both for the stop-event graph (vertices are stop events) and for
/// the stop-to-stop walking graph (vertices are stops).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticGraph {
    first_out: Vec<usize>,
    to_vertex: Vec<usize>,
    travel_time: Vec<Time>,
}

impl Default for StaticGraph {
    fn default() -> Self {
        StaticGraph {
            first_out: vec![0],
            to_vertex: Vec::new(),
            travel_time: Vec::new(),
        }
    }
}

impl StaticGraph {
    /// Builds the graph from an unordered edge list, keeping the relative
    /// order of edges sharing a tail vertex.
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize, Time)]) -> Self {
        let mut first_out = vec![0usize; num_vertices + 1];
        for &(from, _, _) in edges {
            first_out[from + 1] += 1;
        }
        for v in 0..num_vertices {
            first_out[v + 1] += first_out[v];
        }
        let mut to_vertex = vec![0usize; edges.len()];
        let mut travel_time = vec![0 as Time; edges.len()];
        let mut next = first_out.clone();
        for &(from, to, time) in edges {
            let slot = next[from];
            to_vertex[slot] = to;
            travel_time[slot] = time;
            next[from] += 1;
        }
        StaticGraph {
            first_out,
            to_vertex,
            travel_time,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.first_out.len() - 1
    }

    pub fn num_edges(&self) -> usize {
        self.to_vertex.len()
    }

    pub fn is_vertex(&self, vertex: usize) -> bool {
        vertex < self.num_vertices()
    }

    /// Edge ids leaving `vertex`.
    pub fn edges_from(&self, vertex: usize) -> Range<usize> {
        self.first_out[vertex]..self.first_out[vertex + 1]
    }

    pub fn head(&self, edge: usize) -> usize {
        self.to_vertex[edge]
    }

    pub fn travel_time(&self, edge: usize) -> Time {
        self.travel_time[edge]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_csr_with_stable_edge_order() {
        let graph = StaticGraph::from_edges(4, &[(2, 0, 5), (0, 1, 1), (0, 3, 2), (2, 3, 7)]);
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 4);

        let out: Vec<_> = graph
            .edges_from(0)
            .map(|e| (graph.head(e), graph.travel_time(e)))
            .collect();
        assert_eq!(out, vec![(1, 1), (3, 2)]);

        let out: Vec<_> = graph
            .edges_from(2)
            .map(|e| (graph.head(e), graph.travel_time(e)))
            .collect();
        assert_eq!(out, vec![(0, 5), (3, 7)]);

        assert!(graph.edges_from(1).is_empty());
        assert!(graph.edges_from(3).is_empty());
    }
}
