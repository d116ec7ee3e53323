//! Trip-based public transit routing with partition-aware preprocessing.
//!
//! The crate answers earliest-arrival and profile queries on scheduled
//! transit networks. Its centre is the trip-based profile search
//! ([`routing::OneToAllProfile`]) and the arc-flag preprocessing built on
//! top of it ([`preprocessing::compute_arc_flags`]), which stamps every
//! stop-event-graph edge with the partition cells it is useful for. A
//! hub-label query over the time-expanded event graph ([`ptl::PtlQuery`])
//! complements the trip-based engine.

pub mod error;
pub mod model;
pub mod preprocessing;
pub mod prelude;
pub mod ptl;
pub mod routing;

mod binary;

pub use error::{Error, QueryError};

/// Index of a boarding location.
pub type StopId = usize;
/// Index of a route (an equivalence class of trips sharing a stop sequence).
pub type RouteId = usize;
/// Index of a single vehicle journey.
pub type TripId = usize;
/// Index of one (arrive, depart) pair at a stop on a trip.
pub type StopEventId = usize;
/// Position of a stop within a route's stop sequence.
pub type StopIndex = usize;
/// Index of an edge of the stop-event graph.
pub type EdgeId = usize;
/// Seconds since midnight of the first service day.
pub type Time = u32;

pub const NO_STOP: StopId = usize::MAX;
pub const NO_TRIP: TripId = usize::MAX;
pub const NO_STOP_EVENT: StopEventId = usize::MAX;
pub const NO_EDGE: EdgeId = usize::MAX;

/// Round cap of the profile search, bounding the number of trips per journey.
pub const MAX_ROUNDS: usize = 16;

/// Upper bound on the number of partition cells.
pub const MAX_PARTITIONS: usize = 16;

pub const SECONDS_PER_DAY: Time = 24 * 60 * 60;

/// Latest departure time accepted by the query engines (two service days).
pub const MAX_DEPARTURE_TIME: Time = 2 * SECONDS_PER_DAY;
