//! Public-transit labelling: 2-hop hub labels over the time-expanded
//! event graph and the query answering earliest arrivals from them.

pub mod data;
pub mod profiler;
pub mod query;

pub use data::{Hub, Label, LabelStats, PtlData, SideStats};
pub use profiler::{AggregateProfiler, Metric, NoProfiler, Phase, QueryProfiler};
pub use query::{PtlQuery, ScanStrategy, run_ptl_query};
