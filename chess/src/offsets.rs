//! Direction tables for move generation
//!
//! The tables are produced at build time from
//! [`geometry::reflections`](crate::geometry::reflections).

include!(concat!(env!("OUT_DIR"), "/offsets.rs"));
