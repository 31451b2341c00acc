//! Visual scene seam
//!
//! The bridge never owns visual objects. It reaches them through a
//! [`VisualScene`], which hands out copyable handles and answers one
//! question every frame: is this handle still alive?
//!
//! [`Scene`] is a ready-made implementation backed by generational keys.

use bitflags::bitflags;
use rigidsync_math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::fmt;

/// Position and orientation shared by visual objects and bodies
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    /// Create a pose from position and orientation
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// A pose at `position` with no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }
}

/// Geometric descriptor of a visual object
///
/// Parameters follow the scene-graph convention: full sizes, not half sizes,
/// and cylinders stand on their local Y axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// A bounded flat rectangle in the local XY plane
    Plane {
        width: f32,
        height: f32,
    },
    /// Any geometry with no physics counterpart (torus, arbitrary mesh, ...)
    Other {
        kind: String,
    },
}

impl Geometry {
    /// Lowercase name of the geometry kind
    pub fn kind(&self) -> &str {
        match self {
            Geometry::Box { .. } => "box",
            Geometry::Sphere { .. } => "sphere",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Plane { .. } => "plane",
            Geometry::Other { kind } => kind,
        }
    }
}

/// Access the bridge needs to the application's scene graph
///
/// Handles are non-owning. Implementations must report a destroyed object as
/// not alive for as long as the handle exists, even if storage is reused.
pub trait VisualScene {
    /// Copyable reference to one visual object
    type Handle: Copy + Eq + fmt::Debug;

    /// Whether the handle still refers to a live object
    fn is_alive(&self, handle: Self::Handle) -> bool;

    /// Current pose, or None if the object is gone
    fn pose(&self, handle: Self::Handle) -> Option<Pose>;

    /// Geometry descriptor, if the object has one
    fn geometry(&self, handle: Self::Handle) -> Option<&Geometry>;

    /// Overwrite the pose; a no-op for dead handles
    fn set_pose(&mut self, handle: Self::Handle, pose: Pose);
}

bitflags! {
    /// Flags indicating which parts of a visual object have changed
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position or orientation has changed
        const TRANSFORM = 1 << 0;
        /// Geometry descriptor has changed
        const GEOMETRY = 1 << 1;
        /// All flags set
        const ALL = Self::TRANSFORM.bits() | Self::GEOMETRY.bits();
    }
}

new_key_type! {
    /// Generational key to a visual object in a [`Scene`]
    pub struct VisualKey;
}

/// A visual object: pose, optional geometry and change tracking
///
/// Dirty flags are for the consumer of the scene, see [`Scene`].
#[derive(Clone, Debug)]
pub struct VisualObject {
    /// Optional name for lookup and logging
    pub name: Option<String>,
    pose: Pose,
    geometry: Option<Geometry>,
    dirty: DirtyFlags,
}

impl VisualObject {
    /// Create a visual object with the given geometry at the origin
    pub fn new(geometry: Geometry) -> Self {
        Self {
            name: None,
            pose: Pose::default(),
            geometry: Some(geometry),
            dirty: DirtyFlags::ALL,
        }
    }

    /// Create a visual object without geometry (a group node or empty)
    pub fn empty() -> Self {
        Self {
            name: None,
            pose: Pose::default(),
            geometry: None,
            dirty: DirtyFlags::ALL,
        }
    }

    /// Set the name of this object
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the position of this object
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.pose.position = position;
        self
    }

    /// Set the orientation of this object
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.pose.orientation = orientation;
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn orientation(&self) -> Quat {
        self.pose.orientation
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Set the pose and mark the transform as dirty
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    /// Replace the geometry and mark it as dirty
    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry;
        self.dirty |= DirtyFlags::GEOMETRY;
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}

/// Generational store of visual objects
///
/// Removing an object invalidates its key for good, which is exactly the
/// liveness signal the sync loop relies on.
///
/// Every pose written by [`World::tick`](crate::World::tick) sets
/// [`DirtyFlags::TRANSFORM`] on the object. The bridge never reads the flags;
/// a renderer drains them with [`VisualObject::is_dirty`] and
/// [`VisualObject::clear_dirty`] to re-upload only what moved.
#[derive(Default)]
pub struct Scene {
    objects: SlotMap<VisualKey, VisualObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Add an object, returning its key
    pub fn add(&mut self, object: VisualObject) -> VisualKey {
        self.objects.insert(object)
    }

    /// Destroy an object; its key is never alive again
    pub fn remove(&mut self, key: VisualKey) -> Option<VisualObject> {
        self.objects.remove(key)
    }

    pub fn get(&self, key: VisualKey) -> Option<&VisualObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: VisualKey) -> Option<&mut VisualObject> {
        self.objects.get_mut(key)
    }

    /// Find the first object with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(VisualKey, &VisualObject)> {
        self.objects
            .iter()
            .find(|(_, o)| o.name.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualKey, &VisualObject)> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (VisualKey, &mut VisualObject)> {
        self.objects.iter_mut()
    }
}

impl VisualScene for Scene {
    type Handle = VisualKey;

    fn is_alive(&self, handle: VisualKey) -> bool {
        self.objects.contains_key(handle)
    }

    fn pose(&self, handle: VisualKey) -> Option<Pose> {
        self.objects.get(handle).map(VisualObject::pose)
    }

    fn geometry(&self, handle: VisualKey) -> Option<&Geometry> {
        self.objects.get(handle).and_then(VisualObject::geometry)
    }

    fn set_pose(&mut self, handle: VisualKey, pose: Pose) {
        if let Some(object) = self.objects.get_mut(handle) {
            object.set_pose(pose);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Geometry {
        Geometry::Box { width: 1.0, height: 1.0, depth: 1.0 }
    }

    #[test]
    fn test_geometry_kind() {
        assert_eq!(cube().kind(), "box");
        assert_eq!(Geometry::Sphere { radius: 1.0 }.kind(), "sphere");
        assert_eq!(Geometry::Other { kind: "torus".into() }.kind(), "torus");
    }

    #[test]
    fn test_new_object_is_dirty() {
        let object = VisualObject::new(cube());
        assert_eq!(object.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_set_pose_marks_transform_dirty() {
        let mut object = VisualObject::new(cube());
        object.clear_dirty();

        object.set_pose(Pose::from_position(Vec3::new(1.0, 2.0, 3.0)));

        assert!(object.dirty_flags().contains(DirtyFlags::TRANSFORM));
        assert!(!object.dirty_flags().contains(DirtyFlags::GEOMETRY));
        assert_eq!(object.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_set_geometry_marks_geometry_dirty() {
        let mut object = VisualObject::empty();
        object.clear_dirty();
        object.set_geometry(Some(cube()));
        assert_eq!(object.dirty_flags(), DirtyFlags::GEOMETRY);
        assert!(object.geometry().is_some());
    }

    #[test]
    fn test_scene_liveness() {
        let mut scene = Scene::new();
        let key = scene.add(VisualObject::new(cube()));
        assert!(scene.is_alive(key));

        scene.remove(key);
        assert!(!scene.is_alive(key));

        // Reusing the slot does not revive the old key
        let other = scene.add(VisualObject::new(cube()));
        assert!(scene.is_alive(other));
        assert!(!scene.is_alive(key));
    }

    #[test]
    fn test_scene_set_pose_on_dead_handle_is_noop() {
        let mut scene = Scene::new();
        let key = scene.add(VisualObject::new(cube()));
        scene.remove(key);

        scene.set_pose(key, Pose::from_position(Vec3::ONE));

        assert!(scene.pose(key).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_get_by_name() {
        let mut scene = Scene::new();
        scene.add(VisualObject::new(cube()).with_name("crate"));
        let ball = scene.add(VisualObject::new(Geometry::Sphere { radius: 0.5 }).with_name("ball"));

        let (key, object) = scene.get_by_name("ball").expect("ball should exist");
        assert_eq!(key, ball);
        assert_eq!(object.geometry().map(Geometry::kind), Some("sphere"));
        assert!(scene.get_by_name("missing").is_none());
    }
}
