//! The parallel preprocessing sweep over all source stops.

use log::{error, info};
use rayon::prelude::*;

use super::departures::collect_departure_anchors;
use super::flags::EdgeFlags;
use crate::error::QueryError;
use crate::model::{SplitEventGraph, TripBasedData};
use crate::routing::{OneToAllProfile, build_route_labels};
use crate::StopId;

/// Runs the canonical one-to-all profile search for every stop and merges
/// the per-worker flag matrices into one.
///
/// Work is handed out one source stop at a time by rayon's work-stealing
/// scheduler; per-stop cost varies with route density, so no static
/// chunking is used. Each accumulator owns its search state and a private
/// flag matrix, merged by OR at the end. Flags are monotone, so the merge
/// order is immaterial.
pub fn compute_arc_flags(data: &TripBasedData, split: &SplitEventGraph) -> EdgeFlags {
    let route_labels = build_route_labels(data);
    let anchors = collect_departure_anchors(data);
    let num_edges = split.num_edges();
    let cells = data.num_partitions;

    info!(
        "computing arc flags: {} stops, {} split edges, {} cells",
        data.number_of_stops(),
        num_edges,
        cells
    );

    (0..data.number_of_stops())
        .into_par_iter()
        .fold(
            || {
                (
                    OneToAllProfile::new(data, split, &route_labels),
                    EdgeFlags::new(num_edges, cells),
                )
            },
            |(mut search, mut flags), source| {
                if let Err(e) = search.run(source, &anchors[source], &mut flags) {
                    error!("profile search failed for stop {source}: {e}");
                }
                (search, flags)
            },
        )
        .map(|(_, flags)| flags)
        .reduce(|| EdgeFlags::new(num_edges, cells), EdgeFlags::merged)
}

/// Flags contributed by a single source stop; the programmatic entry point
/// for one-to-all profile runs.
pub fn one_to_all_profile(
    data: &TripBasedData,
    split: &SplitEventGraph,
    source: StopId,
) -> Result<EdgeFlags, QueryError> {
    let route_labels = build_route_labels(data);
    let anchors = collect_departure_anchors(data);
    let mut search = OneToAllProfile::new(data, split, &route_labels);
    let mut flags = EdgeFlags::new(split.num_edges(), data.num_partitions);
    search.run(source, &anchors[source], &mut flags)?;
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimetableBuilder;

    fn branched_net() -> TripBasedData {
        // Two overlapping connections so that different sources flag
        // different edge subsets.
        let mut builder = TimetableBuilder::new(5);
        builder
            .add_route(&[0, 1], &[vec![(0, 0), (300, 300)]])
            .add_route(&[1, 2], &[vec![(600, 600), (900, 900)]])
            .add_route(&[1, 3], &[vec![(700, 700), (1000, 1000)]])
            .add_route(&[3, 4], &[vec![(1200, 1200), (1400, 1400)]])
            .set_partition(&[0, 0, 1, 1, 1]);
        builder.build().unwrap()
    }

    #[test]
    fn parallel_sweep_equals_sequential_union() {
        let data = branched_net();
        let split = SplitEventGraph::new(&data);

        let parallel = compute_arc_flags(&data, &split);

        let mut sequential = EdgeFlags::new(split.num_edges(), data.num_partitions);
        for source in 0..data.number_of_stops() {
            let contribution = one_to_all_profile(&data, &split, source).unwrap();
            sequential.union_with(&contribution);
        }

        assert_eq!(parallel, sequential);
        // The journeys out of stop 0 reach cell-1 targets through changes.
        assert!(sequential.count_ones(1) > 0);
    }

    #[test]
    fn flag_matrix_round_trips_through_disk() {
        let data = branched_net();
        let split = SplitEventGraph::new(&data);
        let flags = compute_arc_flags(&data, &split);

        let path = std::env::temp_dir().join("arcbus-flags-roundtrip.bin");
        flags.save(&path).unwrap();
        let loaded = EdgeFlags::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(flags, loaded);
    }
}
