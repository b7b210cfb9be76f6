#![forbid(unsafe_code)]

//! Data owners of a scene.
//!
//! A scene model owns the scene's configuration and data and decides when
//! the UI should observe a new [`UiState`]. Concrete models embed a
//! [`ModelCore`] and implement [`SceneModel`]:
//!
//! ```ignore
//! use scene_runtime::model::{ModelCore, SceneModel};
//! use scene_runtime::UiState;
//!
//! struct BooksModel {
//!     core: ModelCore<String, Vec<String>>,
//! }
//!
//! impl SceneModel for BooksModel {
//!     type Config = String;
//!     type Data = Vec<String>;
//!
//!     fn core(&self) -> &ModelCore<String, Vec<String>> { &self.core }
//!     fn core_mut(&mut self) -> &mut ModelCore<String, Vec<String>> { &mut self.core }
//!
//!     fn bind_subscriptions(&mut self) {
//!         let sink = self.core.sink();
//!         let sub = self.core.data_publisher().subscribe(move |data| {
//!             if let Some(data) = data {
//!                 sink.emit(UiState::Data(data.clone()));
//!             }
//!         });
//!         self.core.subscriptions_mut().store(sub);
//!     }
//! }
//!
//! let model = BooksModel { core: ModelCore::new(Some("Tolkien".into()), None) }.bound();
//! ```
//!
//! # Invariants
//!
//! 1. Construction never emits.
//! 2. Each `emit` reaches the installed callback exactly once, synchronously,
//!    before `emit` returns. No queueing, batching or coalescing.
//! 3. Emitting with no callback installed is a silent no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use scene_core::UiState;
use tracing::{debug, trace, warn};

use crate::reactive::{Published, SubscriptionBag};

type UpdateCallback<D> = Rc<dyn Fn(UiState<D>)>;

/// Cloneable handle to a model's single update slot.
///
/// Every clone reaches the same callback, so closures registered in
/// [`SceneModel::bind_subscriptions`] can emit without borrowing the model.
pub struct StateSink<D> {
    slot: Rc<RefCell<Option<UpdateCallback<D>>>>,
}

impl<D> Clone for StateSink<D> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<D> fmt::Debug for StateSink<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSink")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl<D> StateSink<D> {
    fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Forward `state` to the installed callback, if any.
    pub fn emit(&self, state: UiState<D>) {
        // Clone the callback out so it may reinstall the slot while running.
        let callback = self.slot.borrow().clone();
        match callback {
            Some(callback) => callback(state),
            None => trace!(state = %state.kind(), "update dropped: no callback installed"),
        }
    }

    /// True once a callback has been installed.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.slot.borrow().is_some()
    }

    fn install(&self, callback: UpdateCallback<D>) -> bool {
        self.slot.borrow_mut().replace(callback).is_some()
    }
}

/// Base state shared by every scene model: config, data and the update slot.
pub struct ModelCore<C, D> {
    config: Published<Option<C>>,
    data: Published<Option<D>>,
    sink: StateSink<D>,
    subscriptions: SubscriptionBag,
    bound: bool,
}

impl<C: fmt::Debug, D: fmt::Debug> fmt::Debug for ModelCore<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCore")
            .field("config", &self.config)
            .field("data", &self.data)
            .field("sink", &self.sink)
            .field("subscriptions", &self.subscriptions.len())
            .field("bound", &self.bound)
            .finish()
    }
}

impl<C: Clone + 'static, D: Clone + 'static> Default for ModelCore<C, D> {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl<C: Clone + 'static, D: Clone + 'static> ModelCore<C, D> {
    /// Create a model core. Nothing is emitted.
    ///
    /// The owning model's reactive rules are not wired yet: finish
    /// construction with [`SceneModel::bound`]. [`Scene::new`](crate::Scene::new)
    /// binds any model that was handed over unbound.
    #[must_use]
    pub fn new(config: Option<C>, initial_data: Option<D>) -> Self {
        Self {
            config: Published::new(config),
            data: Published::new(initial_data),
            sink: StateSink::new(),
            subscriptions: SubscriptionBag::new(),
            bound: false,
        }
    }

    /// True once [`SceneModel::bound`] has run for the owning model.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub(crate) fn mark_bound(&mut self) {
        self.bound = true;
    }

    #[must_use]
    pub fn config(&self) -> Option<C> {
        self.config.get()
    }

    /// Publisher of config changes.
    #[must_use]
    pub fn config_publisher(&self) -> &Published<Option<C>> {
        &self.config
    }

    /// Replace the scene parameters. Config is write-once by convention;
    /// subscribers of [`config_publisher`](Self::config_publisher) are
    /// notified all the same.
    pub fn replace_config(&self, config: Option<C>) {
        self.config.set(config);
    }

    #[must_use]
    pub fn data(&self) -> Option<D> {
        self.data.get()
    }

    /// Store new data and notify data subscribers.
    pub fn set_data(&self, data: Option<D>) {
        self.data.set(data);
    }

    /// Publisher of data changes.
    #[must_use]
    pub fn data_publisher(&self) -> &Published<Option<D>> {
        &self.data
    }

    /// Install the sole update sink, replacing any previous one.
    pub fn set_update_callback(&self, callback: impl Fn(UiState<D>) + 'static) {
        if self.sink.install(Rc::new(callback)) {
            warn!("model update callback replaced");
        } else {
            debug!("model update callback installed");
        }
    }

    #[must_use]
    pub fn has_update_callback(&self) -> bool {
        self.sink.is_connected()
    }

    /// Report `state` to the installed callback; dropped if none is set.
    pub fn emit(&self, state: UiState<D>) {
        self.sink.emit(state);
    }

    /// Handle for emitting from subscription closures.
    #[must_use]
    pub fn sink(&self) -> StateSink<D> {
        self.sink.clone()
    }

    #[must_use]
    pub fn subscriptions(&self) -> &SubscriptionBag {
        &self.subscriptions
    }

    /// Storage for subscriptions that must live as long as the model.
    pub fn subscriptions_mut(&mut self) -> &mut SubscriptionBag {
        &mut self.subscriptions
    }
}

/// A scene's data owner.
///
/// Implementations embed a [`ModelCore`] and may override
/// [`bind_subscriptions`](Self::bind_subscriptions) to wire reactive rules.
/// A model is free never to emit automatically and to emit only from
/// explicit operations instead.
pub trait SceneModel: Sized + 'static {
    /// Parameters that configure the scene.
    type Config: Clone + 'static;
    /// The main type of data the scene manages and displays.
    type Data: Clone + 'static;

    fn core(&self) -> &ModelCore<Self::Config, Self::Data>;

    fn core_mut(&mut self) -> &mut ModelCore<Self::Config, Self::Data>;

    /// Wire observers and other reactive rules.
    ///
    /// Called once by [`bound`](Self::bound). The default binds nothing.
    fn bind_subscriptions(&mut self) {}

    /// Finish construction by running [`bind_subscriptions`](Self::bind_subscriptions).
    ///
    /// Idempotent: a model that is already bound is returned unchanged.
    #[must_use]
    fn bound(mut self) -> Self {
        if !self.core().is_bound() {
            self.bind_subscriptions();
            self.core_mut().mark_bound();
        }
        self
    }

    fn emit(&self, state: UiState<Self::Data>) {
        self.core().emit(state);
    }

    fn config(&self) -> Option<Self::Config> {
        self.core().config()
    }

    fn data(&self) -> Option<Self::Data> {
        self.core().data()
    }
}

/// The bare core is itself a model with no reactive rules.
impl<C: Clone + 'static, D: Clone + 'static> SceneModel for ModelCore<C, D> {
    type Config = C;
    type Data = D;

    fn core(&self) -> &ModelCore<C, D> {
        self
    }

    fn core_mut(&mut self) -> &mut ModelCore<C, D> {
        self
    }
}
