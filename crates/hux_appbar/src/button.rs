//! App bar buttons
//!
//! Buttons are identified by [`ButtonType`]; the name is display-only.

use serde::{Deserialize, Serialize};

/// Most custom buttons an app bar lays out
pub const MAX_CUSTOM_BUTTONS: usize = 5;

/// What a button does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    /// Application-defined action
    Custom,
    /// Destroy the target
    Remove,
    /// Enter manipulation
    Adjust,
    /// Collapse the bar
    Hide,
    /// Expand a hidden bar
    Show,
    /// Leave manipulation
    Done,
}

/// Description of one button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonTemplate {
    pub button_type: ButtonType,
    pub name: String,
    /// Icon glyph code
    pub icon: String,
    pub text: String,
    /// Slot in the default layout
    pub default_position: usize,
    /// Slot in the manipulation layout
    pub manipulation_position: usize,
}

impl ButtonTemplate {
    /// Custom button with a name and label
    pub fn custom(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            button_type: ButtonType::Custom,
            name: name.into(),
            icon: String::new(),
            text: text.into(),
            default_position: 0,
            manipulation_position: 0,
        }
    }

    /// Set the icon glyph
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// A template without a name is never instantiated
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Built-in template for a button type.
    ///
    /// Hide sits first, then the custom buttons, then Adjust, then Remove last; slots
    /// close up when a built-in button is disabled.
    pub fn built_in(button_type: ButtonType, custom_count: usize, flags: &BuiltInButtons) -> Self {
        let hide_slot = usize::from(flags.use_hide);
        let (name, icon, text, default_position, manipulation_position) = match button_type {
            ButtonType::Custom => ("Custom", "", "Custom", 0, 0),
            ButtonType::Adjust => ("Adjust", "EBD2", "Adjust", custom_count + hide_slot, 0),
            ButtonType::Done => ("Done", "E8FB", "Done", 0, 0),
            ButtonType::Hide => ("Hide", "E76C", "Hide Menu", 0, 0),
            ButtonType::Remove => (
                "Remove",
                "EC90",
                "Remove",
                custom_count + hide_slot + usize::from(flags.use_adjust),
                1,
            ),
            ButtonType::Show => ("Show", "E700", "Show Menu", 0, 0),
        };
        Self {
            button_type,
            name: name.to_string(),
            icon: icon.to_string(),
            text: text.to_string(),
            default_position,
            manipulation_position,
        }
    }
}

/// Which built-in buttons an app bar carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltInButtons {
    pub use_remove: bool,
    /// Adjust and Done
    pub use_adjust: bool,
    /// Hide and Show
    pub use_hide: bool,
}

impl Default for BuiltInButtons {
    fn default() -> Self {
        Self {
            use_remove: true,
            use_adjust: true,
            use_hide: true,
        }
    }
}

impl BuiltInButtons {
    /// Templates for the enabled built-in buttons
    pub fn templates(&self, custom_count: usize) -> Vec<ButtonTemplate> {
        let mut types = Vec::new();
        if self.use_remove {
            types.push(ButtonType::Remove);
        }
        if self.use_adjust {
            types.extend([ButtonType::Adjust, ButtonType::Done]);
        }
        if self.use_hide {
            types.extend([ButtonType::Hide, ButtonType::Show]);
        }
        types
            .into_iter()
            .map(|ty| ButtonTemplate::built_in(ty, custom_count, self))
            .collect()
    }
}

/// Opaque handle to an instantiated button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonHandle(pub u32);

/// Creates button instances for templates
pub trait ButtonFactory {
    fn instantiate(&mut self, template: &ButtonTemplate) -> ButtonHandle;
}

/// Factory that only hands out sequential handles, for headless use
#[derive(Debug, Clone, Default)]
pub struct CountingFactory {
    next: u32,
    created: Vec<ButtonType>,
}

impl CountingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Types instantiated so far, in order
    pub fn created(&self) -> &[ButtonType] {
        &self.created
    }
}

impl ButtonFactory for CountingFactory {
    fn instantiate(&mut self, template: &ButtonTemplate) -> ButtonHandle {
        let handle = ButtonHandle(self.next);
        self.next += 1;
        self.created.push(template.button_type);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(templates: &[ButtonTemplate], ty: ButtonType) -> Option<usize> {
        templates
            .iter()
            .find(|t| t.button_type == ty)
            .map(|t| t.default_position)
    }

    #[test]
    fn test_default_slots() {
        let templates = BuiltInButtons::default().templates(2);
        assert_eq!(templates.len(), 5);
        assert_eq!(position(&templates, ButtonType::Hide), Some(0));
        assert_eq!(position(&templates, ButtonType::Adjust), Some(3));
        assert_eq!(position(&templates, ButtonType::Remove), Some(4));
    }

    #[test]
    fn test_slots_close_up_without_hide_and_adjust() {
        let flags = BuiltInButtons {
            use_hide: false,
            use_adjust: false,
            ..BuiltInButtons::default()
        };
        let templates = flags.templates(1);
        assert_eq!(templates.len(), 1);
        assert_eq!(position(&templates, ButtonType::Remove), Some(1));
    }

    #[test]
    fn test_remove_is_second_in_manipulation() {
        let templates = BuiltInButtons::default().templates(0);
        let remove = templates
            .iter()
            .find(|t| t.button_type == ButtonType::Remove)
            .unwrap();
        assert_eq!(remove.manipulation_position, 1);
    }

    #[test]
    fn test_empty_template() {
        assert!(ButtonTemplate::custom("", "x").is_empty());
        assert!(!ButtonTemplate::custom("Paint", "Paint").with_icon("E790").is_empty());
    }
}
