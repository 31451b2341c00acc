//! 3D Mathematics Library
//!
//! This crate provides the small set of value types shared by the
//! rigidsync simulation backend and the scene bridge.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for orientations

mod quat;
mod vec3;

pub use quat::Quat;
pub use vec3::Vec3;
