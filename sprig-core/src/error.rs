//! Error types.
//!
//! None of these reach the callers of `s()`, `set()` or `emit()`. Patch
//! failures during a rebuild are logged and the rebuild is abandoned; only
//! mounting and configuration loading return errors to the caller.

use thiserror::Error;

use crate::render::ElementId;

/// Failure reconciling a virtual tree into a document.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The old vnode was never realized, so there is nothing to patch.
    #[error("vnode `{sel}` has no element; it was never mounted")]
    Unmounted { sel: String },

    /// The old vnode points at a node the document no longer has.
    #[error("element {0:?} does not exist in the document")]
    MissingElement(ElementId),

    /// The old vnode must be replaced but its element has no parent.
    #[error("element {0:?} has no parent to patch into")]
    Detached(ElementId),

    /// No element carries the requested mount id.
    #[error("mount target `#{0}` does not exist")]
    MissingTarget(String),

    /// The patcher is already borrowed by an operation further up the stack.
    #[error("patcher is busy with another operation")]
    Busy,
}

/// Failure mounting a root view.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("element with id `{0}` does not exist")]
    MissingRoot(String),

    #[error("failed to patch the mount target: {0}")]
    Patch(#[source] PatchError),
}

impl From<PatchError> for MountError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::MissingTarget(id) => Self::MissingRoot(id),
            other => Self::Patch(other),
        }
    }
}

/// Failure loading a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_becomes_missing_root() {
        let err = MountError::from(PatchError::MissingTarget(String::from("app")));
        assert!(matches!(err, MountError::MissingRoot(ref id) if id == "app"));
        assert_eq!(err.to_string(), "element with id `app` does not exist");
    }

    #[test]
    fn other_patch_errors_are_wrapped() {
        let err = MountError::from(PatchError::Busy);
        assert!(matches!(err, MountError::Patch(PatchError::Busy)));
    }
}
