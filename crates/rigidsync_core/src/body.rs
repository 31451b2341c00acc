//! Body factory
//!
//! A [`PhysicsBody`] is a backend rigid body that has not been registered
//! yet, together with the handle of the visual object it mirrors. Parts can
//! only be added at this stage: [`World::register`](crate::World::register)
//! consumes the value, so a registered body can no longer grow.

use std::fmt;

use rigidsync_math::{Quat, Vec3};
use rigidsync_physics::{AttachedShape, CollisionFilter, RigidBody, Shape};

use crate::deriver::derive_visual;
use crate::error::{Result, SyncError};
use crate::groups::{CollisionGroupRegistry, GroupNames};
use crate::visual::{Pose, VisualScene};

/// An unregistered rigid body linked to a visual object
#[derive(Clone, Debug)]
pub struct PhysicsBody<H> {
    rigid: RigidBody,
    visual: H,
}

impl<H: Copy + Eq + fmt::Debug> PhysicsBody<H> {
    /// Build a body mirroring `visual`
    ///
    /// When `shape` is `None` it is derived from the visual's geometry. The
    /// shape is attached at zero offset and the body starts at the visual's
    /// current pose. A mass of zero makes the body static.
    pub fn new<S>(scene: &S, visual: H, mass: f32, shape: Option<Shape>) -> Result<Self>
    where
        S: VisualScene<Handle = H>,
    {
        let pose = scene.pose(visual).ok_or(SyncError::VisualNotFound)?;
        let shape = match shape {
            Some(shape) => shape,
            None => derive_visual(scene, visual)?,
        };

        if mass < 0.0 {
            log::warn!("Negative mass {} for {:?}, creating a static body", mass, visual);
        }

        let mut rigid = RigidBody::new(mass)
            .with_position(pose.position)
            .with_orientation(pose.orientation);
        rigid.add_shape(shape, Vec3::ZERO, Quat::IDENTITY);

        Ok(Self { rigid, visual })
    }

    /// Append a part placed at another visual object's local pose
    ///
    /// `part` is usually a child of the body's own visual: its position and
    /// orientation become the part's offset within the body. The shape is
    /// derived from the part's geometry when `shape` is `None`.
    pub fn add_part<S>(&mut self, scene: &S, part: H, shape: Option<Shape>) -> Result<()>
    where
        S: VisualScene<Handle = H>,
    {
        let pose = scene.pose(part).ok_or(SyncError::VisualNotFound)?;
        let shape = match shape {
            Some(shape) => shape,
            None => derive_visual(scene, part)?,
        };
        self.rigid.add_shape(shape, pose.position, pose.orientation);
        Ok(())
    }

    /// Apply an impulse at `offset` from the body position
    pub fn apply_central_impulse(&mut self, force: Vec3, offset: Vec3) {
        let point = self.rigid.position + offset;
        self.rigid.apply_impulse(force, point);
    }

    /// Join `group` and collide with every registered group
    pub fn set_collisions(&mut self, registry: &CollisionGroupRegistry, group: &str) -> Result<()> {
        registry.apply_group(&mut self.rigid.filter, group)
    }

    /// Collide with every registered group except `groups`
    pub fn no_collisions(&mut self, registry: &CollisionGroupRegistry, groups: impl GroupNames) -> Result<()> {
        registry.apply_exclusion(&mut self.rigid.filter, groups)
    }

    /// Collide only with `groups`
    pub fn collide_only(&mut self, registry: &CollisionGroupRegistry, groups: impl GroupNames) -> Result<()> {
        registry.apply_inclusion(&mut self.rigid.filter, groups)
    }

    /// Handle of the visual object this body mirrors
    pub fn visual(&self) -> H {
        self.visual
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.rigid.position, self.rigid.orientation)
    }

    pub fn mass(&self) -> f32 {
        self.rigid.mass()
    }

    /// Primary shape first, then parts in the order they were added
    pub fn shapes(&self) -> &[AttachedShape] {
        self.rigid.shapes()
    }

    pub fn filter(&self) -> CollisionFilter {
        self.rigid.filter
    }

    /// The underlying backend body
    pub fn rigid(&self) -> &RigidBody {
        &self.rigid
    }

    /// Mutable access for backend settings such as initial velocity
    pub fn rigid_mut(&mut self) -> &mut RigidBody {
        &mut self.rigid
    }

    pub(crate) fn into_parts(self) -> (RigidBody, H) {
        (self.rigid, self.visual)
    }
}
