#![forbid(unsafe_code)]

//! Test harness for scene relays.
//!
//! - [`recorder`]: a [`SceneHooks`](scene_runtime::SceneHooks) implementation
//!   that logs every hook call in order.
//! - [`fixtures`]: the reference scene used across the workspace tests.

pub mod fixtures;
pub mod recorder;

pub use fixtures::{ReferenceModel, ReferenceScene, reference_scene};
pub use recorder::{HookCall, HookRecorder};
