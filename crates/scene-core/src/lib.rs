#![forbid(unsafe_code)]

//! Core: the UI state carrier and the error type shared by every scene crate.
//!
//! # Role in the workspace
//! `scene-core` holds pure data. It has no reactive machinery and no
//! logging; `scene-runtime` builds the model/controller relay on top of
//! these types, and `scene-harness` records what the relay dispatches.
//!
//! # Primary types
//! - **[`UiState`]**: the closed four-case state a scene can be in.
//! - **[`UiStateKind`]**: payload-free discriminant, used for logging and
//!   for comparing states whose payload is not `PartialEq`.
//! - **[`SceneError`]**: structured construction/attach failures.

pub mod error;
pub mod state;

pub use error::SceneError;
pub use state::{UiState, UiStateKind};
