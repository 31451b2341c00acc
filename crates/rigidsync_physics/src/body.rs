//! Rigid body types for the simulation backend

use crate::collision::CollisionFilter;
use crate::shapes::Shape;
use rigidsync_math::{Quat, Vec3};
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing so a key to a removed body returns None
    /// instead of pointing at whatever body later reuses the slot.
    pub struct BodyKey;
}

/// Whether a body moves under simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Affected by gravity and impulses
    Dynamic,
    /// Zero mass, never moves
    Static,
}

/// A shape attached to a body at a fixed local transform
#[derive(Clone, Debug, PartialEq)]
pub struct AttachedShape {
    pub shape: Shape,
    /// Position relative to the body origin
    pub offset: Vec3,
    /// Orientation relative to the body frame
    pub orientation: Quat,
}

/// A rigid body with a pose, velocities and one or more collision shapes
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Position in world coordinates
    pub position: Vec3,
    /// Orientation in world coordinates
    pub orientation: Quat,
    /// Linear velocity (units per second)
    pub velocity: Vec3,
    /// Angular velocity (radians per second, world axes)
    pub angular_velocity: Vec3,
    /// Collision group/mask pair consulted by the broad-phase
    pub filter: CollisionFilter,
    mass: f32,
    inv_mass: f32,
    inv_inertia: Vec3,
    shapes: Vec<AttachedShape>,
    bounding_radius: f32,
}

impl RigidBody {
    /// Create a body with the given mass and no shapes
    ///
    /// A mass of zero makes the body static. Negative masses are treated as zero.
    pub fn new(mass: f32) -> Self {
        let mass = mass.max(0.0);
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            filter: CollisionFilter::default(),
            mass,
            inv_mass: if mass > 0.0 { 1.0 / mass } else { 0.0 },
            inv_inertia: Vec3::ZERO,
            shapes: Vec::new(),
            bounding_radius: 0.0,
        }
    }

    /// Set the position of this body
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the orientation of this body
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the collision filter of this body
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Attach a shape at a local offset and orientation
    ///
    /// Mass properties and the bounding radius are recomputed from all
    /// attached shapes.
    pub fn add_shape(&mut self, shape: Shape, offset: Vec3, orientation: Quat) {
        self.shapes.push(AttachedShape {
            shape,
            offset,
            orientation,
        });
        self.update_mass_properties();
    }

    /// Attached shapes in attachment order
    pub fn shapes(&self) -> &[AttachedShape] {
        &self.shapes
    }

    /// Mass of the body (0 for static bodies)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass (0 for static bodies)
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Diagonal of the local inverse inertia tensor
    pub fn inv_inertia(&self) -> Vec3 {
        self.inv_inertia
    }

    /// Radius of a sphere around the body origin containing every shape
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Get the body type
    pub fn body_type(&self) -> BodyType {
        if self.mass > 0.0 {
            BodyType::Dynamic
        } else {
            BodyType::Static
        }
    }

    /// Check if this body is static
    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type() == BodyType::Static
    }

    /// Apply an instantaneous impulse at a point in world coordinates
    ///
    /// Changes the linear velocity by `impulse / mass` and the angular
    /// velocity by the inverse inertia times the angular impulse.
    /// Static bodies are unaffected.
    pub fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        if self.is_static() {
            return;
        }

        self.velocity += impulse * self.inv_mass;

        let arm = world_point - self.position;
        let angular_impulse = arm.cross(impulse);
        let local = self.orientation.conjugate().rotate(angular_impulse);
        let scaled = local.component_mul(self.inv_inertia);
        self.angular_velocity += self.orientation.rotate(scaled);
    }

    /// Recompute inertia and bounding radius from the attached shapes
    ///
    /// Inertia is approximated by a solid box filling the local bounding
    /// box of all bounded shapes.
    fn update_mass_properties(&mut self) {
        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = -min;
        let mut radius: f32 = 0.0;

        for attached in &self.shapes {
            radius = radius.max(attached.offset.length() + attached.shape.bounding_radius());

            if let Some(h) = attached.shape.half_extents() {
                let q = attached.orientation;
                let rotated = q.rotate(Vec3::X).abs() * h.x
                    + q.rotate(Vec3::Y).abs() * h.y
                    + q.rotate(Vec3::Z).abs() * h.z;
                min = min.min_components(attached.offset - rotated);
                max = max.max_components(attached.offset + rotated);
            }
        }

        self.bounding_radius = radius;

        if self.inv_mass == 0.0 || min.x > max.x {
            self.inv_inertia = Vec3::ZERO;
            return;
        }

        let half = (max - min) * 0.5;
        let (hx2, hy2, hz2) = (half.x * half.x, half.y * half.y, half.z * half.z);
        let inertia = Vec3::new(hy2 + hz2, hx2 + hz2, hx2 + hy2) * (self.mass / 3.0);
        let invert = |i: f32| if i > 0.0 { 1.0 / i } else { 0.0 };
        self.inv_inertia = Vec3::new(invert(inertia.x), invert(inertia.y), invert(inertia.z));
    }
}
