//! chaintally — post-processing for MCMC redistricting chains.
//!
//! A random-walk driver samples districting plans and scores each one. This
//! crate shapes and summarizes what the walk produced; it never generates
//! plans or computes scores itself.
//!
//! - [`p_value_report`]: how extreme is the initial plan's score relative to
//!   the sampled ensemble, as a one-sided Chikina–Frieze–Pegden bound.
//! - [`Histogram`]: fixed-bin summary of a score distribution.
//! - [`ChainOutputTable`]: one row per sampled plan, one column per tracked
//!   statistic, some statistics keyed by district id.

pub mod core;

pub use crate::core::histogram::{Histogram, HistogramError};
pub use crate::core::report::{p_value_report, PValueReport, ReportError};
pub use crate::core::table::{
    tabulate, CellValue, ChainOutputTable, DistrictId, Row, Scalar, TableError,
};
