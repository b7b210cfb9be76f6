//! The relay emits tracing events without disturbing dispatch.

use scene_harness::HookRecorder;
use scene_runtime::{LayoutCatalog, ModelCore, Scene, SceneError, SceneModel, UiState, UiStateKind};
use tracing_subscriber::EnvFilter;

fn with_trace_subscriber(f: impl FnOnce()) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
}

#[test]
fn dispatch_under_trace_subscriber() {
    with_trace_subscriber(|| {
        let mut scene = Scene::new(ModelCore::<(), u8>::default(), HookRecorder::<u8>::new());
        scene.model().core().emit(UiState::Loading);
        scene.attach().expect("attach");
        scene.model().core().emit(UiState::Data(1));
        scene.model().core().emit(UiState::Error);

        assert_eq!(
            scene.view().specific_kinds(),
            vec![UiStateKind::Initial, UiStateKind::Data, UiStateKind::Error]
        );
    });
}

#[test]
fn rejected_operations_under_trace_subscriber() {
    with_trace_subscriber(|| {
        let mut scene = Scene::new(ModelCore::<(), u8>::default(), HookRecorder::<u8>::new());
        scene.attach().expect("attach");
        assert!(matches!(
            scene.attach(),
            Err(SceneError::AlreadyAttached { .. })
        ));

        let catalog: LayoutCatalog<HookRecorder<u8>> = LayoutCatalog::new();
        assert!(Scene::try_from_layout(&catalog, ModelCore::<(), u8>::default()).is_err());

        // Replacing the callback is logged and takes over the slot.
        scene.model().core().set_update_callback(|_| {});
        scene.model().core().emit(UiState::Error);
        assert_eq!(scene.view().count(UiStateKind::Error), 0);
    });
}
