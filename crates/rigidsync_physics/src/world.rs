//! Physics world and simulation

use crate::body::{BodyKey, RigidBody};
use crate::collision::bounding_spheres_overlap;
use rigidsync_math::Vec3;
use slotmap::SlotMap;

/// Broad-phase strategy used to find candidate collision pairs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Broadphase {
    /// Test every body pair: filter check, then bounding-sphere overlap
    #[default]
    Naive,
    /// Skip pair generation entirely
    Disabled,
}

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to dynamic bodies
    pub gravity: Vec3,
    /// Broad-phase strategy
    pub broadphase: Broadphase,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            broadphase: Broadphase::Naive,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity vector
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            broadphase: Broadphase::Naive,
        }
    }

    /// Set the broad-phase strategy
    pub fn with_broadphase(mut self, broadphase: Broadphase) -> Self {
        self.broadphase = broadphase;
        self
    }
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Candidate pairs found by the broad-phase during the last step
    pairs: Vec<(BodyKey, BodyKey)>,
    /// Total simulated time in seconds
    time: f64,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            pairs: Vec::new(),
            time: 0.0,
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.pairs.retain(|&(a, b)| a != key && b != key);
        self.bodies.remove(key)
    }

    /// Check whether a key refers to a body in this world
    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Candidate collision pairs from the most recent step
    pub fn collision_pairs(&self) -> &[(BodyKey, BodyKey)] {
        &self.pairs
    }

    /// Total simulated time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Gravity application to dynamic bodies
    /// 2. Linear and angular velocity integration into the pose
    /// 3. Broad-phase pair generation (no contact resolution)
    pub fn step(&mut self, dt: f32) {
        let gravity = self.config.gravity;

        for (_key, body) in &mut self.bodies {
            if body.is_static() {
                continue;
            }

            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
            body.orientation = body.orientation.integrate(body.angular_velocity, dt);
        }

        self.update_pairs();
        self.time += f64::from(dt);
    }

    /// Rebuild the candidate pair list with the configured broad-phase
    fn update_pairs(&mut self) {
        self.pairs.clear();
        if self.config.broadphase == Broadphase::Disabled {
            return;
        }

        // Collect all keys first (needed because we index pairs by position)
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let a = &self.bodies[keys[i]];
                let b = &self.bodies[keys[j]];

                // Two static bodies never need testing
                if a.is_static() && b.is_static() {
                    continue;
                }
                if !a.filter.collides_with(&b.filter) {
                    continue;
                }
                if bounding_spheres_overlap(a.position, a.bounding_radius(), b.position, b.bounding_radius()) {
                    self.pairs.push((keys[i], keys[j]));
                }
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
