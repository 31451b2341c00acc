//! Rigid-body simulation backend for rigidsync
//!
//! This crate provides the simulation side of the bridge:
//! - Collision shapes (spheres, boxes, cylinders, infinite planes)
//! - Rigid bodies with compound shapes, mass properties and impulses
//! - Group/mask collision filtering
//! - A world with gravity, fixed-step integration and a naive broad-phase
//!
//! Contact resolution is intentionally absent: the broad-phase only
//! reports candidate pairs.

pub mod body;
pub mod collision;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{AttachedShape, BodyKey, BodyType, RigidBody};
pub use collision::{bounding_spheres_overlap, CollisionFilter, CollisionGroups};
pub use shapes::{Cuboid, Cylinder, Plane, Shape, Sphere};
pub use world::{Broadphase, PhysicsConfig, PhysicsWorld};
