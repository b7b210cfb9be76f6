#![forbid(unsafe_code)]

//! Runtime: the reactive relay between a scene's model and its UI hooks.
//!
//! # Role in the workspace
//! `scene-runtime` turns the pure [`UiState`] from `scene-core` into a live
//! binding. A [`SceneModel`] owns config and data and emits states; a
//! [`Scene`] owns the model, records each state and dispatches it to the
//! [`SceneHooks`] of its view.
//!
//! # Threading
//! Everything is built on `Rc`/`RefCell` and is therefore neither `Send`
//! nor `Sync`. All calls into a scene happen on the thread that built it,
//! typically the UI thread.

pub mod controller;
pub mod loader;
pub mod model;
pub mod reactive;

pub use controller::{Scene, SceneHooks, dispatch};
pub use loader::{LayoutCatalog, ViewLoader};
pub use model::{ModelCore, SceneModel, StateSink};
pub use reactive::{Published, Subscription, SubscriptionBag, WeakPublished};
pub use scene_core::{SceneError, UiState, UiStateKind};
