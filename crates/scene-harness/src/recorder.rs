#![forbid(unsafe_code)]

//! Hook recording for assertions on dispatch order.

use scene_core::{UiState, UiStateKind};
use scene_runtime::{SceneHooks, SceneModel};

/// One hook invocation, in the order the relay made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall<D> {
    Initial,
    Loading,
    Data(D),
    Error,
    UpdateUiElements(UiState<D>),
}

impl<D> HookCall<D> {
    /// State kind of a specific hook; `None` for `UpdateUiElements`.
    #[must_use]
    pub fn kind(&self) -> Option<UiStateKind> {
        match self {
            Self::Initial => Some(UiStateKind::Initial),
            Self::Loading => Some(UiStateKind::Loading),
            Self::Data(_) => Some(UiStateKind::Data),
            Self::Error => Some(UiStateKind::Error),
            Self::UpdateUiElements(_) => None,
        }
    }
}

/// Records every hook call made on it.
#[derive(Debug, Clone)]
pub struct HookRecorder<D> {
    calls: Vec<HookCall<D>>,
}

impl<D> Default for HookRecorder<D> {
    fn default() -> Self {
        Self { calls: Vec::new() }
    }
}

impl<D: Clone> HookRecorder<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[HookCall<D>] {
        &self.calls
    }

    /// Kinds of the specific hooks fired, skipping `update_ui_elements`.
    #[must_use]
    pub fn specific_kinds(&self) -> Vec<UiStateKind> {
        self.calls.iter().filter_map(HookCall::kind).collect()
    }

    /// How many times the specific hook for `kind` fired.
    #[must_use]
    pub fn count(&self, kind: UiStateKind) -> usize {
        self.calls
            .iter()
            .filter(|call| call.kind() == Some(kind))
            .count()
    }

    /// States passed to `update_ui_elements`, in order.
    #[must_use]
    pub fn ui_updates(&self) -> Vec<UiState<D>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HookCall::UpdateUiElements(state) => Some(state.clone()),
                _ => None,
            })
            .collect()
    }

    /// Payloads passed to `on_state_data`, in order.
    #[must_use]
    pub fn data_payloads(&self) -> Vec<D> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HookCall::Data(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

/// Records for any model whose data type matches; the model is not inspected.
impl<M> SceneHooks<M> for HookRecorder<M::Data>
where
    M: SceneModel,
{
    fn on_state_initial(&mut self, _model: &M) {
        self.calls.push(HookCall::Initial);
    }

    fn on_state_loading(&mut self, _model: &M) {
        self.calls.push(HookCall::Loading);
    }

    fn on_state_data(&mut self, _model: &M, data: &M::Data) {
        self.calls.push(HookCall::Data(data.clone()));
    }

    fn on_state_error(&mut self, _model: &M) {
        self.calls.push(HookCall::Error);
    }

    fn update_ui_elements(&mut self, _model: &M, state: &UiState<M::Data>) {
        self.calls.push(HookCall::UpdateUiElements(state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_runtime::{ModelCore, dispatch};

    type ByteModel = ModelCore<(), u8>;

    #[test]
    fn dispatch_records_specific_hook_then_catch_all() {
        let model = ByteModel::default();
        let mut recorder = HookRecorder::new();
        dispatch(&mut recorder, &model, &UiState::Data(3u8));
        dispatch(&mut recorder, &model, &UiState::Error);

        assert_eq!(
            recorder.calls(),
            &[
                HookCall::Data(3),
                HookCall::UpdateUiElements(UiState::Data(3)),
                HookCall::Error,
                HookCall::UpdateUiElements(UiState::Error),
            ]
        );
        assert_eq!(recorder.count(UiStateKind::Data), 1);
        assert_eq!(recorder.data_payloads(), vec![3]);
        assert_eq!(recorder.ui_updates(), vec![UiState::Data(3), UiState::Error]);

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn layout_name_is_recorder() {
        assert_eq!(
            <HookRecorder<u8> as SceneHooks<ByteModel>>::layout_name(),
            "HookRecorder"
        );
    }
}
