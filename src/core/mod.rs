//! Core post-processing: score binning, p-value bounds, chain output tables.

pub mod histogram;
pub mod report;
pub mod table;
