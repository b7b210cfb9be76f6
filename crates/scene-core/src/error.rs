#![forbid(unsafe_code)]

//! Structured failures surfaced by scene construction and attachment.
//!
//! Domain failures are not errors here: a scene reports them as
//! [`UiState::Error`](crate::UiState::Error) values.

use std::fmt;

/// Errors from scene construction and lifecycle misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No layout is registered under the scene's layout name.
    MissingLayout { name: String },
    /// `attach()` was called on a scene that is already attached.
    AlreadyAttached { name: String },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLayout { name } => write!(f, "no layout registered for scene '{name}'"),
            Self::AlreadyAttached { name } => write!(f, "scene '{name}' is already attached"),
        }
    }
}

impl std::error::Error for SceneError {}
