//! Scene bridge for the rigidsync simulation
//!
//! This crate keeps visual objects and physics bodies in step:
//!
//! - [`derive`] - Collision shape from a [`Geometry`] descriptor
//! - [`CollisionGroupRegistry`] - Named groups mapped to mask bits
//! - [`PhysicsBody`] - An unregistered body linked to a visual object
//! - [`World`] - Owner of the simulation and the live bodies, with the
//!   per-frame [`tick`](World::tick)
//! - [`WorldConfig`] - Gravity, time step and groups for [`World::from_config`]
//! - [`VisualScene`] - What the bridge needs from the scene graph, with
//!   [`Scene`] as a ready-made implementation

mod body;
mod config;
mod deriver;
mod error;
mod groups;
mod visual;
mod world;

pub use body::PhysicsBody;
pub use config::WorldConfig;
pub use deriver::{cylinder_correction, derive, derive_visual, NO_GEOMETRY, PLANE_HALF_THICKNESS};
pub use error::{Result, SyncError};
pub use groups::{CollisionGroupRegistry, GroupNames, MAX_GROUPS};
pub use visual::{DirtyFlags, Geometry, Pose, Scene, VisualKey, VisualObject, VisualScene};
pub use world::{BodyLink, SyncReport, World, DEFAULT_TIME_STEP};

// Re-export commonly used types from the backend and math crates
pub use rigidsync_math::{Quat, Vec3};
pub use rigidsync_physics::{
    BodyKey, CollisionFilter, CollisionGroups, Cuboid, Cylinder, PhysicsConfig, PhysicsWorld, Plane,
    RigidBody, Shape, Sphere,
};
