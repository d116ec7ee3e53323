//! Compact per-trip indices tracking how far the search has reached.

use crate::model::TripBasedData;
use crate::{MAX_ROUNDS, StopIndex, TripId};

/// For each trip, the smallest stop index reached in the current round.
///
/// The not-reached sentinel is the trip's route length, so a comparison
/// against any valid index reads as "not reached yet".
#[derive(Debug, Clone)]
pub struct ReachedIndex {
    index: Vec<u16>,
    default: Vec<u16>,
}

impl ReachedIndex {
    pub fn new(data: &TripBasedData) -> Self {
        let default: Vec<u16> = (0..data.number_of_trips())
            .map(|trip| data.route_length(data.route_of_trip[trip]) as u16)
            .collect();
        ReachedIndex {
            index: default.clone(),
            default,
        }
    }

    pub fn clear(&mut self) {
        self.index.copy_from_slice(&self.default);
    }

    pub fn get(&self, trip: TripId) -> StopIndex {
        self.index[trip] as StopIndex
    }

    pub fn already_reached(&self, trip: TripId, index: StopIndex) -> bool {
        self.get(trip) <= index
    }

    /// Clamps the stored index downward; never raises it.
    pub fn update(&mut self, trip: TripId, index: StopIndex) {
        let entry = &mut self.index[trip];
        *entry = (*entry).min(index as u16);
    }
}

/// Per-trip reached indices for every round of one profile sweep.
///
/// The sixteen rounds of a trip are packed contiguously so the per-round
/// clamp in [`ProfileReachedIndex::update`] runs over one cache line; a
/// vectorising compiler can fuse the lane minima into a single comparison.
#[derive(Debug, Clone)]
pub struct ProfileReachedIndex {
    index: Vec<u16>,
    default: Vec<u16>,
}

impl ProfileReachedIndex {
    pub fn new(data: &TripBasedData) -> Self {
        let mut default = vec![0u16; data.number_of_trips() * MAX_ROUNDS];
        for trip in 0..data.number_of_trips() {
            let length = data.route_length(data.route_of_trip[trip]) as u16;
            default[trip * MAX_ROUNDS..(trip + 1) * MAX_ROUNDS].fill(length);
        }
        ProfileReachedIndex {
            index: default.clone(),
            default,
        }
    }

    pub fn clear(&mut self) {
        self.index.copy_from_slice(&self.default);
    }

    /// Smallest index reached with at most `round` trips, `round` in
    /// `1..=MAX_ROUNDS`.
    pub fn get(&self, trip: TripId, round: usize) -> StopIndex {
        debug_assert!((1..=MAX_ROUNDS).contains(&round));
        self.index[trip * MAX_ROUNDS + round - 1] as StopIndex
    }

    pub fn already_reached(&self, trip: TripId, index: StopIndex, round: usize) -> bool {
        self.get(trip, round) <= index
    }

    /// Clamps the reached index of `trip` for `round` and all later rounds:
    /// whatever is reachable with `round` trips is reachable with more.
    pub fn update(&mut self, trip: TripId, index: StopIndex, round: usize) {
        debug_assert!((1..=MAX_ROUNDS).contains(&round));
        let index = index as u16;
        for lane in &mut self.index[trip * MAX_ROUNDS + round - 1..(trip + 1) * MAX_ROUNDS] {
            *lane = (*lane).min(index);
        }
    }
}
