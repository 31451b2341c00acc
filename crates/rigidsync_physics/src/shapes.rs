//! Collision shapes for the simulation backend
//!
//! These are lightweight primitives expressed in body-local coordinates.
//! A body places each one at a fixed local offset and orientation.

use rigidsync_math::{Quat, Vec3};

/// A sphere centred on its local origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere with the given radius
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// A box centred on its local origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    /// Half the size along each local axis
    pub half_extents: Vec3,
}

impl Cuboid {
    /// Create a box from its half-extents
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Full size along each local axis
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }
}

/// A (possibly tapered) cylinder approximated by a convex point set
///
/// Built along the local Z axis: the bottom ring sits at `z = -height / 2`
/// and the top ring at `z = height / 2`. Scene graphs that stand cylinders
/// on their Y axis need to rotate the points with
/// [`transform_all_points`](Self::transform_all_points) before use.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub segments: u32,
    vertices: Vec<Vec3>,
}

impl Cylinder {
    /// Minimum number of radial segments for a closed hull
    pub const MIN_SEGMENTS: u32 = 3;

    /// Build a cylinder hull; `segments` is raised to [`Self::MIN_SEGMENTS`] if lower
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(Self::MIN_SEGMENTS);
        let half_height = height * 0.5;
        let mut vertices = Vec::with_capacity(segments as usize * 2);

        for i in 0..segments {
            let theta = std::f32::consts::TAU * i as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vec3::new(radius_bottom * cos, radius_bottom * sin, -half_height));
            vertices.push(Vec3::new(radius_top * cos, radius_top * sin, half_height));
        }

        Self {
            radius_top,
            radius_bottom,
            height,
            segments,
            vertices,
        }
    }

    /// Hull vertices in local coordinates
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Rotate every hull vertex in place
    ///
    /// Cumulative: calling it twice applies the rotation twice.
    pub fn transform_all_points(&mut self, rotation: Quat) {
        for v in &mut self.vertices {
            *v = rotation.rotate(*v);
        }
    }

    /// Half-extents of the axis-aligned box around the hull
    pub fn half_extents(&self) -> Vec3 {
        self.vertices
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc.max_components(v.abs()))
    }

    /// Distance from the local origin to the farthest vertex
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }
}

/// An infinite plane through the local origin
///
/// Points with `normal · p > 0` are on the positive side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal in local coordinates
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane; the normal is normalized automatically
    pub fn new(normal: Vec3) -> Self {
        Self { normal: normal.normalized() }
    }

    /// Horizontal ground plane facing +Y
    pub fn ground() -> Self {
        Self::new(Vec3::Y)
    }
}

/// Shape enum for storing different collision shape types
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Plane(Plane),
}

impl Shape {
    /// Short lowercase name of the shape type
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Cuboid(_) => "cuboid",
            Shape::Cylinder(_) => "cylinder",
            Shape::Plane(_) => "plane",
        }
    }

    /// Radius of a sphere around the local origin that contains the shape
    ///
    /// Planes are unbounded and report infinity.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Shape::Sphere(s) => s.radius,
            Shape::Cuboid(b) => b.half_extents.length(),
            Shape::Cylinder(c) => c.bounding_radius(),
            Shape::Plane(_) => f32::INFINITY,
        }
    }

    /// Half-extents of the local axis-aligned bounding box
    ///
    /// Returns `None` for unbounded shapes.
    pub fn half_extents(&self) -> Option<Vec3> {
        match self {
            Shape::Sphere(s) => Some(Vec3::ONE * s.radius),
            Shape::Cuboid(b) => Some(b.half_extents),
            Shape::Cylinder(c) => Some(c.half_extents()),
            Shape::Plane(_) => None,
        }
    }

    /// Whether the shape has finite extent
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Shape::Plane(_))
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Cuboid> for Shape {
    fn from(b: Cuboid) -> Self {
        Shape::Cuboid(b)
    }
}

impl From<Cylinder> for Shape {
    fn from(c: Cylinder) -> Self {
        Shape::Cylinder(c)
    }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Self {
        Shape::Plane(p)
    }
}
