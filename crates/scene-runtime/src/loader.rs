#![forbid(unsafe_code)]

//! Building scene views from named layouts.
//!
//! A [`ViewLoader`] turns a layout name into a fresh view. The scene
//! factories ([`Scene::from_layout`](crate::Scene::from_layout)) ask for the
//! layout named after the view type and yield `None` when it is missing.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing layout | Name not registered | `load` returns `None` |
//! | Duplicate register | Same name twice | Later factory wins |

use std::collections::HashMap;
use std::fmt;

/// Source of views keyed by layout name.
pub trait ViewLoader<V> {
    /// Build a view for `layout`, or `None` if no such layout exists.
    fn load(&self, layout: &str) -> Option<V>;
}

type ViewFactory<V> = Box<dyn Fn() -> V>;

/// In-memory registry of view factories.
pub struct LayoutCatalog<V> {
    factories: HashMap<String, ViewFactory<V>>,
}

impl<V> Default for LayoutCatalog<V> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<V> fmt::Debug for LayoutCatalog<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("LayoutCatalog")
            .field("layouts", &names)
            .finish()
    }
}

impl<V> LayoutCatalog<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier registration.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> V + 'static,
    ) -> &mut Self {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_layout(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> V + 'static,
    ) -> Self {
        self.register(name, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<V> ViewLoader<V> for LayoutCatalog<V> {
    fn load(&self, layout: &str) -> Option<V> {
        self.factories.get(layout).map(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SceneHooks;
    use crate::model::ModelCore;
    use crate::Scene;
    use scene_core::SceneError;

    #[derive(Debug, PartialEq)]
    struct Banner(&'static str);

    impl SceneHooks<ModelCore<(), String>> for Banner {}

    #[test]
    fn catalog_loads_registered_layout() {
        let catalog = LayoutCatalog::new().with_layout("Banner", || Banner("hello"));
        assert!(catalog.contains("Banner"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.load("Banner"), Some(Banner("hello")));
        assert_eq!(catalog.load("Missing"), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut catalog = LayoutCatalog::new();
        catalog
            .register("Banner", || Banner("old"))
            .register("Banner", || Banner("new"));
        assert_eq!(catalog.load("Banner"), Some(Banner("new")));
    }

    #[test]
    fn scene_from_layout_uses_view_type_name() {
        let catalog = LayoutCatalog::new().with_layout("Banner", || Banner("hi"));
        let scene = Scene::from_layout(&catalog, ModelCore::<(), String>::default())
            .expect("layout registered");
        assert_eq!(scene.label(), "Banner");
        assert_eq!(*scene.view(), Banner("hi"));
    }

    #[test]
    fn missing_layout_yields_none() {
        let catalog: LayoutCatalog<Banner> = LayoutCatalog::new();
        let scene = Scene::from_layout(&catalog, ModelCore::<(), String>::default());
        assert!(scene.is_none());

        let err = Scene::try_from_layout(&catalog, ModelCore::<(), String>::default())
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::MissingLayout {
                name: "Banner".into()
            }
        );
    }
}
