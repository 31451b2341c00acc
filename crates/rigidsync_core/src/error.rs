//! Error types for the scene bridge

use thiserror::Error;

use crate::groups::MAX_GROUPS;

/// Errors surfaced by body creation and collision-group operations
///
/// The per-frame sync loop never produces one of these: a visual object
/// disappearing is a normal lifecycle event, handled by removing its body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The geometry descriptor has no physics mapping and no shape was supplied
    #[error("unsupported shape kind '{0}': supply an explicit shape")]
    UnsupportedShapeKind(String),
    /// A collision group name is not in the current registry
    #[error("unknown collision group '{0}'")]
    UnknownGroup(String),
    /// The same group name was listed twice in one registration
    #[error("collision group '{0}' listed more than once")]
    DuplicateGroup(String),
    /// More groups than fit in the bitmask
    #[error("{0} collision groups requested, at most {max} fit in a mask", max = MAX_GROUPS)]
    TooManyGroups(usize),
    /// The visual handle does not refer to a live object
    #[error("visual object is not alive")]
    VisualNotFound,
    /// The body key is not registered with this world
    #[error("body is not registered in this world")]
    BodyNotFound,
}

/// Result alias for bridge operations
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_shape_display() {
        let msg = SyncError::UnsupportedShapeKind("torus".to_string()).to_string();
        assert!(msg.contains("torus"));
        assert!(msg.contains("explicit shape"));
    }

    #[test]
    fn test_unknown_group_display() {
        let msg = SyncError::UnknownGroup("ghosts".to_string()).to_string();
        assert_eq!(msg, "unknown collision group 'ghosts'");
    }

    #[test]
    fn test_too_many_groups_display() {
        let msg = SyncError::TooManyGroups(40).to_string();
        assert!(msg.contains("40"));
        assert!(msg.contains("31"));
    }
}
