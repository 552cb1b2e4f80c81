//! Calendar logic: date windows, loading, enrichment, merging, mutations.

pub mod cache;
pub mod enrich;
pub mod issues;
pub mod log;
pub mod merge;
pub mod mutations;
pub mod pipeline;
pub mod ports;
pub mod range;
