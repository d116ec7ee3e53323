// Re-export of the public surface.
pub use crate::error::{Error, QueryError};
pub use crate::model::{
    SplitEventGraph, TimeExpandedData, TimetableBuilder, TripBasedData,
};
pub use crate::preprocessing::{
    EdgeFlags, collect_departure_anchors, compute_arc_flags, one_to_all_profile,
};
pub use crate::ptl::{PtlData, PtlQuery, ScanStrategy, run_ptl_query};
pub use crate::routing::{OneToAllProfile, build_route_labels};

// Core index and time types.
pub use crate::{EdgeId, RouteId, StopEventId, StopId, StopIndex, Time, TripId};
pub use crate::{MAX_ROUNDS, SECONDS_PER_DAY};
