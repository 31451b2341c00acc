//! Serializable world settings
//!
//! Loading from files and the environment lives in the root crate; this is
//! only the shape of the data and the defaults.

use serde::{Deserialize, Serialize};

use crate::world::DEFAULT_TIME_STEP;

/// Construction parameters for a [`World`](crate::World)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity vector [x, y, z]
    pub gravity: [f32; 3],
    /// Fixed step applied on every tick, in seconds
    pub time_step: f32,
    /// Collision group names, in bit order
    pub collision_groups: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            time_step: DEFAULT_TIME_STEP,
            collision_groups: Vec::new(),
        }
    }
}
