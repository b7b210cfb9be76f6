#![forbid(unsafe_code)]

//! The scene controller: relays model updates to UI hooks.
//!
//! # Flow
//!
//! ```text
//! model.emit(state)
//!   -> update callback (weak handle to the scene's state holder)
//!   -> Published<UiState<D>>::set
//!   -> dispatcher subscription (armed by attach)
//!   -> on_state_* hook, then update_ui_elements
//! ```
//!
//! Everything runs synchronously on the caller's stack, before `emit`
//! returns.
//!
//! # Invariants
//!
//! 1. The scene owns its model; the model holds only a weak handle to the
//!    scene's state holder, never a reference to the scene itself.
//! 2. Before [`Scene::attach`] the state is still recorded but no hook runs.
//! 3. `attach` dispatches `Initial` exactly once, whatever the model did
//!    before.
//! 4. Each state set after `attach` fires exactly one specific hook and then
//!    `update_ui_elements`, in emission order.
//! 5. A state emitted from inside a hook is queued and dispatched after the
//!    running dispatch completes. Queued states drain in FIFO order before
//!    the outermost `emit` returns.
//!
//! # Failure Modes
//!
//! - **View borrowed during emit**: holding the [`Ref`] from [`Scene::view`]
//!   across an `emit` panics when the dispatcher borrows the view.
//! - **Second attach**: rejected with [`SceneError::AlreadyAttached`]; the
//!   relay is left as it was.

use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use scene_core::{SceneError, UiState};
use tracing::{debug, trace, warn};

use crate::loader::ViewLoader;
use crate::model::SceneModel;
use crate::reactive::{Published, Subscription};

/// Overridable UI hooks of a scene whose model is `M`.
///
/// Every hook defaults to a no-op and receives the scene's model, so a hook
/// may start operations on it (a fetch from `on_state_initial`, a retry from
/// `on_state_error`). States the model emits meanwhile are dispatched once
/// the current hook pass finishes.
///
/// For each dispatched state exactly one of the `on_state_*` hooks runs,
/// followed by [`update_ui_elements`](Self::update_ui_elements).
pub trait SceneHooks<M: SceneModel> {
    /// The scene was attached. Replaces a "did load" lifecycle callback.
    fn on_state_initial(&mut self, _model: &M) {}

    /// An operation is pending.
    fn on_state_loading(&mut self, _model: &M) {}

    /// Data has been retrieved and is ready to be shown.
    fn on_state_data(&mut self, _model: &M, _data: &M::Data) {}

    /// An operation failed or data could not be displayed.
    fn on_state_error(&mut self, _model: &M) {}

    /// Called for every state change after the specific hook. A single place
    /// to update UI elements based on the new state.
    fn update_ui_elements(&mut self, _model: &M, _state: &UiState<M::Data>) {}

    /// Name of the layout this view is built from, and the scene's log label.
    ///
    /// Defaults to the unqualified type name without generic arguments.
    fn layout_name() -> &'static str
    where
        Self: Sized,
    {
        short_type_name::<Self>()
    }
}

/// Route `state` to its hook, then to `update_ui_elements`.
pub fn dispatch<M, H>(hooks: &mut H, model: &M, state: &UiState<M::Data>)
where
    M: SceneModel,
    H: SceneHooks<M> + ?Sized,
{
    match state {
        UiState::Initial => hooks.on_state_initial(model),
        UiState::Loading => hooks.on_state_loading(model),
        UiState::Data(data) => hooks.on_state_data(model, data),
        UiState::Error => hooks.on_state_error(model),
    }
    hooks.update_ui_elements(model, state);
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Serializes hook passes: nested deliveries are queued, not run in place.
struct Dispatcher<M: SceneModel, V> {
    model: Weak<M>,
    view: Rc<RefCell<V>>,
    pending: RefCell<VecDeque<UiState<M::Data>>>,
    draining: Cell<bool>,
    label: &'static str,
}

impl<M, V> Dispatcher<M, V>
where
    M: SceneModel,
    V: SceneHooks<M>,
{
    fn deliver(&self, state: &UiState<M::Data>) {
        self.pending.borrow_mut().push_back(state.clone());
        if self.draining.replace(true) {
            trace!(scene = self.label, state = %state.kind(), "dispatch queued");
            return;
        }

        if let Some(model) = self.model.upgrade() {
            loop {
                let next = self.pending.borrow_mut().pop_front();
                let Some(state) = next else { break };
                trace!(scene = self.label, state = %state.kind(), "dispatch");
                dispatch(&mut *self.view.borrow_mut(), &*model, &state);
            }
        } else {
            self.pending.borrow_mut().clear();
        }
        self.draining.set(false);
    }
}

/// A model/view pair bound through a [`UiState`] relay.
///
/// `M` owns the data, `V` implements the hooks. The scene owns both; it is
/// the model's only update subscriber from the moment it is constructed.
pub struct Scene<M: SceneModel, V> {
    model: Rc<M>,
    view: Rc<RefCell<V>>,
    state: Published<UiState<M::Data>>,
    dispatcher: Option<Subscription>,
    label: &'static str,
}

impl<M, V> fmt::Debug for Scene<M, V>
where
    M: SceneModel,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("label", &self.label)
            .field("state", &self.state.with(UiState::kind))
            .field("version", &self.state.version())
            .field("attached", &self.dispatcher.is_some())
            .finish_non_exhaustive()
    }
}

impl<M, V> Scene<M, V>
where
    M: SceneModel,
    V: SceneHooks<M> + 'static,
{
    /// Build a scene and install it as the model's update sink.
    ///
    /// A model that was not yet [`bound`](SceneModel::bound) is bound here.
    pub fn new(model: M, view: V) -> Self {
        let label = <V as SceneHooks<M>>::layout_name();
        if !model.core().is_bound() {
            debug!(scene = label, "binding model subscriptions");
        }
        let model = Rc::new(model.bound());

        let state = Published::new(UiState::Initial);
        let relay = state.downgrade();
        model.core().set_update_callback(move |next| {
            if let Some(state) = relay.upgrade() {
                state.set(next);
            }
        });
        debug!(scene = label, "scene constructed");

        Self {
            model,
            view: Rc::new(RefCell::new(view)),
            state,
            dispatcher: None,
            label,
        }
    }

    /// Factory form of [`new`](Self::new). Never fails.
    #[must_use]
    pub fn instance(model: M, view: V) -> Option<Self> {
        Some(Self::new(model, view))
    }

    /// Build the view from the layout named by [`SceneHooks::layout_name`].
    ///
    /// Returns `None` when the loader has no such layout.
    #[must_use]
    pub fn from_layout<L>(loader: &L, model: M) -> Option<Self>
    where
        L: ViewLoader<V> + ?Sized,
    {
        Self::try_from_layout(loader, model).ok()
    }

    /// Like [`from_layout`](Self::from_layout), reporting which layout was
    /// missing.
    pub fn try_from_layout<L>(loader: &L, model: M) -> Result<Self, SceneError>
    where
        L: ViewLoader<V> + ?Sized,
    {
        let name = <V as SceneHooks<M>>::layout_name();
        let view = loader.load(name).ok_or_else(|| {
            debug!(scene = name, "layout not found");
            SceneError::MissingLayout {
                name: name.to_string(),
            }
        })?;
        Ok(Self::new(model, view))
    }

    /// Arm the dispatcher and dispatch `Initial`.
    ///
    /// The dispatcher only sees states set after it is armed, so the seed
    /// value is never dispatched twice.
    pub fn attach(&mut self) -> Result<(), SceneError> {
        if self.dispatcher.is_some() {
            warn!(scene = self.label, "attach called on an attached scene");
            return Err(SceneError::AlreadyAttached {
                name: self.label.to_string(),
            });
        }

        let dispatcher = Dispatcher {
            model: Rc::downgrade(&self.model),
            view: Rc::clone(&self.view),
            pending: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
            label: self.label,
        };
        self.dispatcher = Some(self.state.subscribe(move |state| dispatcher.deliver(state)));
        debug!(scene = self.label, "scene attached");

        self.set_state(UiState::Initial);
        Ok(())
    }

    fn set_state(&self, state: UiState<M::Data>) {
        self.state.set(state);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// The last state reported to this scene.
    #[must_use]
    pub fn state(&self) -> UiState<M::Data> {
        self.state.get()
    }

    /// Number of states recorded so far, including the one `attach` sets.
    #[must_use]
    pub fn state_version(&self) -> u64 {
        self.state.version()
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The scene's model. Models mutate through interior mutability
    /// (`set_data`, `emit`), so shared access is enough to drive them.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Borrow the view.
    ///
    /// # Panics
    ///
    /// Panics if called from inside one of the view's own hooks.
    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// Mutate the view outside of dispatch.
    pub fn with_view_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.view.borrow_mut())
    }
}
