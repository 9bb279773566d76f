//! Shared building blocks for `portr`: the scan data model, the error taxonomy,
//! configuration, and parsing of hosts and port ranges.
//!
//! Nothing in this crate performs network I/O.

pub mod config;
pub mod error;
pub mod network;
pub mod scan;
