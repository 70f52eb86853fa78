#![forbid(unsafe_code)]

//! Error types for scene edits and navigation builds.

use std::fmt;

use crate::arena::{ElementId, GroupId};

/// Errors from structural scene edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownGroup(GroupId),
    UnknownElement(ElementId),
    /// The element exists but belongs to another group.
    NotAMember { element: ElementId, group: GroupId },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroup(id) => write!(f, "unknown group {id}"),
            Self::UnknownElement(id) => write!(f, "unknown element {id}"),
            Self::NotAMember { element, group } => {
                write!(f, "element {element} is not a member of group {group}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Errors from a host collision world during a ray build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Attaching a probe collider failed.
    Attach(String),
    /// A ray cast failed.
    Raycast(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attach(msg) => write!(f, "probe attach failed: {msg}"),
            Self::Raycast(msg) => write!(f, "raycast failed: {msg}"),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Errors from a navigation build. A failed build leaves adjacency as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    UnknownGroup(GroupId),
    /// Weighted scoring needs both weights strictly positive.
    InvalidWeights { distance: f32, angle: f32 },
    /// A parameter is NaN or otherwise unusable.
    InvalidParams(&'static str),
    Probe(ProbeError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroup(id) => write!(f, "unknown group {id}"),
            Self::InvalidWeights { distance, angle } => write!(
                f,
                "score weights must both be positive (distance={distance}, angle={angle})"
            ),
            Self::InvalidParams(what) => write!(f, "invalid builder parameters: {what}"),
            Self::Probe(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Probe(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProbeError> for BuildError {
    fn from(err: ProbeError) -> Self {
        Self::Probe(err)
    }
}
