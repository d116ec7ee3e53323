//! The 2-hop hub-label query.

use hashbrown::HashSet;

use super::data::{Hub, PtlData};
use super::profiler::{Metric, NoProfiler, Phase, QueryProfiler};
use crate::error::QueryError;
use crate::{MAX_DEPARTURE_TIME, StopEventId, StopId, Time};

/// How the arrival candidates at the target are scanned.
///
/// Both strategies return the same result. The binary strategy relies on
/// the label invariant that reaching an arrival event implies reaching
/// every later arrival at the same stop (wait at the target), so the
/// intersection predicate is monotone over the candidate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    Linear,
    #[default]
    Binary,
}

/// Earliest-arrival query over a loaded label set.
///
/// The hub hash set is kept between queries to reuse its allocation.
pub struct PtlQuery<'a, P = NoProfiler> {
    data: &'a PtlData,
    hubs: HashSet<Hub>,
    profiler: P,
}

impl<'a> PtlQuery<'a, NoProfiler> {
    pub fn new(data: &'a PtlData) -> Self {
        Self::with_profiler(data, NoProfiler)
    }
}

impl<'a, P: QueryProfiler> PtlQuery<'a, P> {
    pub fn with_profiler(data: &'a PtlData, profiler: P) -> Self {
        PtlQuery {
            data,
            hubs: HashSet::new(),
            profiler,
        }
    }

    pub fn profiler(&self) -> &P {
        &self.profiler
    }

    /// Earliest arrival at `target` when leaving `source` no earlier than
    /// `departure_time`, or `None` if no journey exists.
    pub fn run(
        &mut self,
        source: StopId,
        departure_time: Time,
        target: StopId,
        strategy: ScanStrategy,
    ) -> Result<Option<Time>, QueryError> {
        let data = self.data;
        let te = data.te();
        if !te.is_stop(source) || !te.is_stop(target) {
            return Err(QueryError::InvalidStop);
        }
        if departure_time > MAX_DEPARTURE_TIME {
            return Err(QueryError::InvalidTime);
        }
        if source == target {
            return Ok(Some(departure_time));
        }

        self.profiler.start();

        self.profiler.start_phase();
        let first = te.first_reachable_departure(source, departure_time);
        self.profiler.done_phase(Phase::FindFirstVertex);
        let Some(first) = first else {
            self.profiler.done();
            return Ok(None);
        };

        self.profiler.start_phase();
        self.hubs.clear();
        for &hub in data.fwd_label(first) {
            self.hubs.insert(hub);
            self.profiler.count(Metric::InsertedHubs);
        }
        self.profiler.done_phase(Phase::BuildHubSet);

        self.profiler.start_phase();
        let arrivals = te.arrivals_of_stop(target);
        let left = arrivals.partition_point(|&event| te.arrival_time(event) < departure_time);
        let result = match strategy {
            ScanStrategy::Linear => self.scan_linear(arrivals, left),
            ScanStrategy::Binary => self.scan_binary(arrivals, left),
        };
        self.profiler.done_phase(Phase::Scan);
        self.profiler.done();
        Ok(result)
    }

    fn intersects(&mut self, event: StopEventId) -> bool {
        self.profiler.count(Metric::CheckedArrivalEvents);
        for hub in self.data.bwd_label(event) {
            self.profiler.count(Metric::CheckedHubs);
            if self.hubs.contains(hub) {
                return true;
            }
        }
        false
    }

    fn scan_linear(&mut self, arrivals: &[StopEventId], left: usize) -> Option<Time> {
        for &event in &arrivals[left..] {
            if self.intersects(event) {
                self.profiler.count(Metric::FoundSolutions);
                return Some(self.data.te().arrival_time(event));
            }
        }
        None
    }

    /// Finds the first intersecting candidate by bisection; the final
    /// candidate is probed directly when the bisection never saw a hit.
    fn scan_binary(&mut self, arrivals: &[StopEventId], left: usize) -> Option<Time> {
        if left >= arrivals.len() {
            return None;
        }
        let mut i = left;
        let mut j = arrivals.len() - 1;
        let mut hit = false;
        while i < j {
            let mid = i + (j - i) / 2;
            if self.intersects(arrivals[mid]) {
                j = mid;
                hit = true;
            } else {
                i = mid + 1;
            }
        }
        if !hit && !self.intersects(arrivals[i]) {
            return None;
        }
        self.profiler.count(Metric::FoundSolutions);
        Some(self.data.te().arrival_time(arrivals[i]))
    }
}

/// One-shot query entry point.
pub fn run_ptl_query(
    data: &PtlData,
    source: StopId,
    departure_time: Time,
    target: StopId,
    strategy: ScanStrategy,
) -> Result<Option<Time>, QueryError> {
    PtlQuery::new(data).run(source, departure_time, target, strategy)
}
