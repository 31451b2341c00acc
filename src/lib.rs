//! rigidsync: keep a scene graph and a rigid-body simulation in step
//!
//! The bridge itself lives in [`rigidsync_core`]; this crate adds layered
//! configuration loading on top and re-exports everything.

pub mod config;

pub use rigidsync_core::*;
