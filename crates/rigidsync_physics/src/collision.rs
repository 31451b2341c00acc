//! Collision filtering and broad-phase tests
//!
//! Bodies carry a group/mask pair of bitmasks. Named group bits are assigned
//! at runtime by the caller; the backend only knows about the reserved
//! default bit and the "everything" mask.

use bitflags::bitflags;
use rigidsync_math::Vec3;

bitflags! {
    /// Collision group bitmask
    ///
    /// Each group is a bit in a 32-bit mask. Only [`DEFAULT`](Self::DEFAULT)
    /// and [`ALL`](Self::ALL) are named here; other bits are handed out at
    /// runtime and built with [`CollisionGroups::from_bits_retain`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionGroups: u32 {
        /// Group every body starts in
        const DEFAULT = 1 << 0;
        /// All groups (collide with everything)
        const ALL = u32::MAX;
    }
}

/// Collision filter determining what a body collides with
///
/// - `group`: which group(s) this body belongs to
/// - `mask`: which group(s) this body can collide with
///
/// Two bodies A and B are considered for collision if:
/// - (A.group & B.mask) != 0, AND
/// - (B.group & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which group(s) this body belongs to
    pub group: CollisionGroups,
    /// Which group(s) this body can collide with
    pub mask: CollisionGroups,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            group: CollisionGroups::DEFAULT,
            mask: CollisionGroups::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified group and mask
    pub fn new(group: CollisionGroups, mask: CollisionGroups) -> Self {
        Self { group, mask }
    }

    /// Create a filter from raw bit values
    pub fn from_bits(group: u32, mask: u32) -> Self {
        Self {
            group: CollisionGroups::from_bits_retain(group),
            mask: CollisionGroups::from_bits_retain(mask),
        }
    }

    /// Check if this filter allows collision with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.group.intersects(other.mask) && other.group.intersects(self.mask)
    }
}

/// Test whether two bounding spheres overlap or touch
///
/// An infinite radius always overlaps.
pub fn bounding_spheres_overlap(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> bool {
    if radius_a.is_infinite() || radius_b.is_infinite() {
        return true;
    }
    let reach = radius_a + radius_b;
    (center_b - center_a).length_squared() <= reach * reach
}
