#![forbid(unsafe_code)]

//! Reference scene: `(String, i32)` config, `Vec<String>` data.
//!
//! The model publishes `Data` whenever its data is replaced after
//! construction and reports `Error` from [`ReferenceModel::fail_call`].

use scene_core::UiState;
use scene_runtime::{ModelCore, Scene, SceneModel};

use crate::recorder::HookRecorder;

pub type ReferenceConfig = (String, i32);
pub type ReferenceData = Vec<String>;

/// Model whose data changes are mirrored as `Data` states.
#[derive(Debug)]
pub struct ReferenceModel {
    core: ModelCore<ReferenceConfig, ReferenceData>,
}

impl ReferenceModel {
    #[must_use]
    pub fn new(config: Option<ReferenceConfig>, initial_data: Option<ReferenceData>) -> Self {
        Self {
            core: ModelCore::new(config, initial_data),
        }
        .bound()
    }

    /// Simulate a successful fetch.
    pub fn success_call(&self, data: ReferenceData) {
        self.core.set_data(Some(data));
    }

    /// Simulate a failed fetch.
    pub fn fail_call(&self) {
        self.emit(UiState::Error);
    }

    pub fn start_loading(&self) {
        self.emit(UiState::Loading);
    }
}

impl SceneModel for ReferenceModel {
    type Config = ReferenceConfig;
    type Data = ReferenceData;

    fn core(&self) -> &ModelCore<ReferenceConfig, ReferenceData> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<ReferenceConfig, ReferenceData> {
        &mut self.core
    }

    fn bind_subscriptions(&mut self) {
        let sink = self.core.sink();
        let sub = self.core.data_publisher().subscribe(move |data| {
            if let Some(data) = data {
                sink.emit(UiState::Data(data.clone()));
            }
        });
        self.core.subscriptions_mut().store(sub);
    }
}

pub type ReferenceScene = Scene<ReferenceModel, HookRecorder<ReferenceData>>;

/// Unattached reference scene with `("config", 111)` and two data items.
#[must_use]
pub fn reference_scene() -> ReferenceScene {
    let model = ReferenceModel::new(
        Some(("config".to_string(), 111)),
        Some(vec!["data1".to_string(), "data2".to_string()]),
    );
    Scene::new(model, HookRecorder::new())
}
