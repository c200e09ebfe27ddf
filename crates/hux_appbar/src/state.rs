//! App bar states

use serde::{Deserialize, Serialize};

use crate::button::ButtonType;

/// App bar state.
///
/// `Invisible` is only entered by timeout and only left through an explicit Show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppBarState {
    /// Custom buttons plus Adjust, Remove and Hide
    #[default]
    Default,
    /// Done and Remove; the bounding box accepts input
    Manipulation,
    /// Show only
    Hidden,
    /// Timed out; bar and bounding box are both off
    Invisible,
}

impl AppBarState {
    /// Whether a button of this type is shown in this state
    pub fn shows(self, button_type: ButtonType) -> bool {
        use ButtonType::*;
        match self {
            AppBarState::Default => matches!(button_type, Custom | Adjust | Remove | Hide),
            AppBarState::Manipulation => matches!(button_type, Done | Remove),
            AppBarState::Hidden => button_type == Show,
            AppBarState::Invisible => false,
        }
    }

    /// Whether the bounding box accepts input in this state
    pub fn accepts_input(self) -> bool {
        self == AppBarState::Manipulation
    }
}
