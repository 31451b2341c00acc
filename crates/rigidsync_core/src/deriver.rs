//! Shape derivation from geometry descriptors
//!
//! Maps scene-graph geometry onto backend collision shapes. Sizes are halved
//! where the backend works in half-extents, and cylinders are re-oriented
//! because the backend builds them along Z while scenes stand them on Y.

use std::f32::consts::FRAC_PI_2;

use rigidsync_math::{Quat, Vec3};
use rigidsync_physics::{Cuboid, Cylinder, Shape, Sphere};

use crate::error::{Result, SyncError};
use crate::visual::{Geometry, VisualScene};

/// Half-thickness of the box standing in for a bounded visual plane
pub const PLANE_HALF_THICKNESS: f32 = 0.01;

/// Kind reported when a visual object carries no geometry at all
pub const NO_GEOMETRY: &str = "none";

/// Rotation taking a Z-aligned backend cylinder to a Y-aligned scene cylinder
pub fn cylinder_correction() -> Quat {
    Quat::from_axis_angle(Vec3::X, -FRAC_PI_2)
}

/// Derive a collision shape from a geometry descriptor
///
/// Fails with [`SyncError::UnsupportedShapeKind`] for geometry that has no
/// physics counterpart.
pub fn derive(geometry: &Geometry) -> Result<Shape> {
    let shape = match *geometry {
        Geometry::Box { width, height, depth } => {
            Cuboid::new(Vec3::new(width, height, depth) * 0.5).into()
        }
        Geometry::Sphere { radius } => Sphere::new(radius).into(),
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => {
            let mut cylinder = Cylinder::new(radius_top, radius_bottom, height, radial_segments);
            cylinder.transform_all_points(cylinder_correction());
            cylinder.into()
        }
        // The backend plane is infinite, so a thin box stands in for the finite surface
        Geometry::Plane { width, height } => {
            Cuboid::new(Vec3::new(width * 0.5, height * 0.5, PLANE_HALF_THICKNESS)).into()
        }
        Geometry::Other { ref kind } => {
            return Err(SyncError::UnsupportedShapeKind(kind.clone()));
        }
    };
    Ok(shape)
}

/// Derive the collision shape of a visual object in a scene
///
/// Fails with [`SyncError::VisualNotFound`] for dead handles and with
/// [`SyncError::UnsupportedShapeKind`] when the object has no usable geometry.
pub fn derive_visual<S: VisualScene>(scene: &S, visual: S::Handle) -> Result<Shape> {
    if !scene.is_alive(visual) {
        return Err(SyncError::VisualNotFound);
    }
    match scene.geometry(visual) {
        Some(geometry) => derive(geometry),
        None => Err(SyncError::UnsupportedShapeKind(NO_GEOMETRY.to_string())),
    }
}
