//! Query instrumentation, selected at compile time.
//!
//! The query engine is generic over the profiler so the no-op variant
//! monomorphises away; no dispatch happens on the hot path.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FindFirstVertex = 0,
    BuildHubSet = 1,
    Scan = 2,
}

pub const NUM_PHASES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    InsertedHubs = 0,
    CheckedArrivalEvents = 1,
    CheckedHubs = 2,
    FoundSolutions = 3,
}

pub const NUM_METRICS: usize = 4;

pub trait QueryProfiler {
    #[inline]
    fn start(&mut self) {}
    #[inline]
    fn done(&mut self) {}
    #[inline]
    fn start_phase(&mut self) {}
    #[inline]
    fn done_phase(&mut self, _phase: Phase) {}
    #[inline]
    fn count(&mut self, _metric: Metric) {}
}

/// Zero-cost default: every hook is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProfiler;

impl QueryProfiler for NoProfiler {}

/// Accumulates phase timings and metric counts over all executed queries.
#[derive(Debug, Default, Clone)]
pub struct AggregateProfiler {
    total: Duration,
    phase_time: [Duration; NUM_PHASES],
    metrics: [u64; NUM_METRICS],
    queries: u64,
    query_timer: Option<Instant>,
    phase_timer: Option<Instant>,
}

impl AggregateProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_queries(&self) -> u64 {
        self.queries
    }

    pub fn metric(&self, metric: Metric) -> u64 {
        self.metrics[metric as usize]
    }

    pub fn phase_time(&self, phase: Phase) -> Duration {
        self.phase_time[phase as usize]
    }

    pub fn mean_query_time(&self) -> Duration {
        if self.queries == 0 {
            Duration::ZERO
        } else {
            self.total / self.queries as u32
        }
    }
}

impl QueryProfiler for AggregateProfiler {
    fn start(&mut self) {
        self.query_timer = Some(Instant::now());
    }

    fn done(&mut self) {
        if let Some(timer) = self.query_timer.take() {
            self.total += timer.elapsed();
        }
        self.queries += 1;
    }

    fn start_phase(&mut self) {
        self.phase_timer = Some(Instant::now());
    }

    fn done_phase(&mut self, phase: Phase) {
        if let Some(timer) = self.phase_timer.take() {
            self.phase_time[phase as usize] += timer.elapsed();
        }
    }

    fn count(&mut self, metric: Metric) {
        self.metrics[metric as usize] += 1;
    }
}
