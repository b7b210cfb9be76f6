#![forbid(unsafe_code)]

//! The closed set of states a scene's UI can be in.
//!
//! # Invariants
//!
//! 1. Exactly one variant is active; there is no composite state.
//! 2. Only [`UiState::Data`] carries a payload.
//! 3. The default state is [`UiState::Initial`].

use std::fmt;

/// The various states a scene's UI can be set to.
///
/// `D` is the main type of data the scene manages and displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiState<D> {
    /// Nothing has loaded yet.
    #[default]
    Initial,
    /// An operation is pending.
    Loading,
    /// Data is ready to be shown.
    Data(D),
    /// The scene's operation failed or its data is unusable.
    Error,
}

impl<D> UiState<D> {
    /// Payload-free discriminant of this state.
    #[must_use]
    pub const fn kind(&self) -> UiStateKind {
        match self {
            Self::Initial => UiStateKind::Initial,
            Self::Loading => UiStateKind::Loading,
            Self::Data(_) => UiStateKind::Data,
            Self::Error => UiStateKind::Error,
        }
    }

    /// Borrow the payload, if this is [`UiState::Data`].
    #[must_use]
    pub const fn data(&self) -> Option<&D> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Consume the state and return the payload, if any.
    #[must_use]
    pub fn into_data(self) -> Option<D> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Borrowing view of this state.
    #[must_use]
    pub const fn as_ref(&self) -> UiState<&D> {
        match self {
            Self::Initial => UiState::Initial,
            Self::Loading => UiState::Loading,
            Self::Data(data) => UiState::Data(data),
            Self::Error => UiState::Error,
        }
    }

    /// Map the payload, leaving payload-free variants untouched.
    pub fn map<E>(self, f: impl FnOnce(D) -> E) -> UiState<E> {
        match self {
            Self::Initial => UiState::Initial,
            Self::Loading => UiState::Loading,
            Self::Data(data) => UiState::Data(f(data)),
            Self::Error => UiState::Error,
        }
    }

    #[must_use]
    pub const fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Discriminant of a [`UiState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiStateKind {
    Initial,
    Loading,
    Data,
    Error,
}

impl UiStateKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Initial, Self::Loading, Self::Data, Self::Error];

    /// Stable lowercase name, used as a log field value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Loading => "loading",
            Self::Data => "data",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for UiStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<D> From<&UiState<D>> for UiStateKind {
    fn from(state: &UiState<D>) -> Self {
        state.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_initial() {
        let state: UiState<Vec<String>> = UiState::default();
        assert!(state.is_initial());
        assert_eq!(state.kind(), UiStateKind::Initial);
    }

    #[test]
    fn data_payload_access() {
        let state = UiState::Data(vec!["a".to_string()]);
        assert_eq!(state.data(), Some(&vec!["a".to_string()]));
        assert_eq!(state.kind(), UiStateKind::Data);
        assert_eq!(state.into_data(), Some(vec!["a".to_string()]));
    }

    #[test]
    fn payload_free_variants_have_no_data() {
        for state in [UiState::<u8>::Initial, UiState::Loading, UiState::Error] {
            assert_eq!(state.data(), None);
        }
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(UiState::Data(3), UiState::Data(3));
        assert_ne!(UiState::Data(3), UiState::Data(4));
        assert_ne!(UiState::<u8>::Loading, UiState::Error);
    }

    #[test]
    fn map_only_touches_data() {
        assert_eq!(UiState::Data(2).map(|n| n * 10), UiState::Data(20));
        assert_eq!(UiState::<i32>::Error.map(|n| n * 10), UiState::Error);
    }

    #[test]
    fn as_ref_borrows_payload() {
        let state = UiState::Data(String::from("x"));
        assert_eq!(state.as_ref(), UiState::Data(&String::from("x")));
    }

    #[test]
    fn kind_names() {
        let names: Vec<_> = UiStateKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["initial", "loading", "data", "error"]);
    }

    fn state_strategy() -> impl Strategy<Value = UiState<u16>> {
        prop_oneof![
            Just(UiState::Initial),
            Just(UiState::Loading),
            any::<u16>().prop_map(UiState::Data),
            Just(UiState::Error),
        ]
    }

    proptest! {
        #[test]
        fn kind_agrees_with_predicates(state in state_strategy()) {
            let kind = state.kind();
            prop_assert_eq!(kind == UiStateKind::Initial, state.is_initial());
            prop_assert_eq!(kind == UiStateKind::Loading, state.is_loading());
            prop_assert_eq!(kind == UiStateKind::Error, state.is_error());
            prop_assert_eq!(kind == UiStateKind::Data, state.data().is_some());
        }
    }
}
