//! World container and per-frame sync loop
//!
//! The World owns the simulation backend, the list of live bodies and the
//! collision group registry. Each [`tick`](World::tick) copies simulated
//! poses onto visual objects, drops bodies whose visual is gone, then steps
//! the simulation by a fixed time step.

use std::fmt;

use rigidsync_math::Vec3;
use rigidsync_physics::{BodyKey, PhysicsConfig, PhysicsWorld, RigidBody, Shape};

use crate::body::PhysicsBody;
use crate::config::WorldConfig;
use crate::error::{Result, SyncError};
use crate::groups::{CollisionGroupRegistry, GroupNames};
use crate::visual::{Pose, VisualScene};

/// Default fixed time step (60 Hz)
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Link between a registered body and the visual object it mirrors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyLink<H> {
    pub key: BodyKey,
    pub visual: H,
}

/// Result of a sync tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncReport<H> {
    /// Number of visual objects whose pose was written
    pub synced: usize,
    /// Bodies removed because their visual object was gone
    pub removed: Vec<BodyLink<H>>,
}

impl<H> Default for SyncReport<H> {
    fn default() -> Self {
        Self {
            synced: 0,
            removed: Vec::new(),
        }
    }
}

/// Owner of the simulation and of every registered body
pub struct World<H> {
    physics: PhysicsWorld,
    /// Live bodies in registration order
    links: Vec<BodyLink<H>>,
    groups: CollisionGroupRegistry,
    time_step: f32,
}

impl<H: Copy + Eq + fmt::Debug> World<H> {
    /// Create a world with the given gravity and the default time step
    pub fn new(gravity: Vec3) -> Self {
        Self::with_time_step(gravity, DEFAULT_TIME_STEP)
    }

    /// Create a world with the given gravity and fixed time step
    pub fn with_time_step(gravity: Vec3, time_step: f32) -> Self {
        Self::with_physics_config(PhysicsConfig::new(gravity), time_step)
    }

    /// Create a world from a full backend configuration
    pub fn with_physics_config(config: PhysicsConfig, time_step: f32) -> Self {
        let mut world = Self {
            physics: PhysicsWorld::with_config(config),
            links: Vec::new(),
            groups: CollisionGroupRegistry::new(),
            time_step: DEFAULT_TIME_STEP,
        };
        world.set_time_step(time_step);
        world
    }

    /// Create a world from settings, installing the configured collision groups
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        let mut world = Self::with_time_step(Vec3::from(config.gravity), config.time_step);
        if !config.collision_groups.is_empty() {
            world.set_collision_groups(config.collision_groups.iter().cloned())?;
        }
        Ok(world)
    }

    /// Fixed step applied on every tick
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Change the fixed step; non-positive or non-finite values are ignored
    pub fn set_time_step(&mut self, time_step: f32) {
        if time_step.is_finite() && time_step > 0.0 {
            self.time_step = time_step;
        } else {
            log::warn!(
                "Ignoring invalid time step {}, keeping {}",
                time_step,
                self.time_step
            );
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.physics.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.physics.config.gravity = gravity;
    }

    /// The simulation backend
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable access to the simulation backend
    ///
    /// Bodies removed directly through the backend are dropped from the
    /// live list on the next tick without touching their visual.
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// The collision group registry
    pub fn groups(&self) -> &CollisionGroupRegistry {
        &self.groups
    }

    /// Replace all collision groups (not additive)
    ///
    /// Bodies configured before the call keep their old bit values.
    pub fn set_collision_groups<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.set_groups(names)?;
        log::info!("Collision groups: {:?}", self.groups.names().collect::<Vec<_>>());
        Ok(())
    }

    /// Build an unregistered body for `visual`
    pub fn new_body<S>(&self, scene: &S, visual: H, mass: f32, shape: Option<Shape>) -> Result<PhysicsBody<H>>
    where
        S: VisualScene<Handle = H>,
    {
        PhysicsBody::new(scene, visual, mass, shape)
    }

    /// Add a body to the simulation and to the live list
    ///
    /// Each call creates a new backend body, so registering clones of the
    /// same [`PhysicsBody`] produces duplicates.
    pub fn register(&mut self, body: PhysicsBody<H>) -> BodyKey {
        let (rigid, visual) = body.into_parts();
        let key = self.physics.add_body(rigid);
        self.links.push(BodyLink { key, visual });
        log::debug!("Registered body {:?} for visual {:?}", key, visual);
        key
    }

    /// Create a body for `visual` and register it
    pub fn add_body<S>(&mut self, scene: &S, visual: H, mass: f32, shape: Option<Shape>) -> Result<BodyKey>
    where
        S: VisualScene<Handle = H>,
    {
        let body = self.new_body(scene, visual, mass, shape)?;
        Ok(self.register(body))
    }

    /// Remove a body from the simulation and the live list
    pub fn remove(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.links.retain(|link| link.key != key);
        self.physics.remove_body(key)
    }

    /// Copy body poses to visuals, prune orphans, then step once
    ///
    /// A body whose visual is no longer alive is removed before the step,
    /// so it never receives another simulation step or pose write.
    pub fn tick<S>(&mut self, scene: &mut S) -> SyncReport<H>
    where
        S: VisualScene<Handle = H>,
    {
        let mut report = SyncReport::default();
        let physics = &mut self.physics;

        self.links.retain(|link| {
            if !scene.is_alive(link.visual) {
                log::debug!("Visual {:?} is gone, removing body {:?}", link.visual, link.key);
                physics.remove_body(link.key);
                report.removed.push(*link);
                return false;
            }

            match physics.get_body(link.key) {
                Some(body) => {
                    scene.set_pose(link.visual, Pose::new(body.position, body.orientation));
                    report.synced += 1;
                    true
                }
                None => {
                    log::debug!("Body {:?} left the simulation, unlinking", link.key);
                    false
                }
            }
        });

        self.physics.step(self.time_step);
        report
    }

    /// Join `group` and collide with every registered group
    pub fn set_collisions(&mut self, key: BodyKey, group: &str) -> Result<()> {
        let body = self.physics.get_body_mut(key).ok_or(SyncError::BodyNotFound)?;
        self.groups.apply_group(&mut body.filter, group)
    }

    /// Collide with every registered group except `groups`
    pub fn no_collisions(&mut self, key: BodyKey, groups: impl GroupNames) -> Result<()> {
        let body = self.physics.get_body_mut(key).ok_or(SyncError::BodyNotFound)?;
        self.groups.apply_exclusion(&mut body.filter, groups)
    }

    /// Collide only with `groups`
    pub fn collide_only(&mut self, key: BodyKey, groups: impl GroupNames) -> Result<()> {
        let body = self.physics.get_body_mut(key).ok_or(SyncError::BodyNotFound)?;
        self.groups.apply_inclusion(&mut body.filter, groups)
    }

    /// Apply an impulse at `offset` from a registered body's position
    pub fn apply_central_impulse(&mut self, key: BodyKey, force: Vec3, offset: Vec3) -> Result<()> {
        let body = self.physics.get_body_mut(key).ok_or(SyncError::BodyNotFound)?;
        let point = body.position + offset;
        body.apply_impulse(force, point);
        Ok(())
    }

    /// Get a registered body by key
    pub fn body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.physics.get_body(key)
    }

    /// Visual object linked to a registered body
    pub fn visual_of(&self, key: BodyKey) -> Option<H> {
        self.links.iter().find(|link| link.key == key).map(|link| link.visual)
    }

    /// Live bodies in registration order
    pub fn bodies(&self) -> &[BodyLink<H>] {
        &self.links
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
