//! Arc-flag preprocessing: per-source profile sweeps fanned out over a
//! worker pool, aggregated into the shared edge-flag matrix.

pub mod arc_flags;
pub mod departures;
pub mod flags;

pub use arc_flags::{compute_arc_flags, one_to_all_profile};
pub use departures::collect_departure_anchors;
pub use flags::EdgeFlags;
