use std::fmt;

/// A menu, panel or widget description that cannot be built.
///
/// Returned by the `build()` methods in [`crate::config`]; nothing reaches the
/// generator until it validates.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A menu, panel or widget was given an empty key.
    EmptyKey { what: &'static str },
    /// Two widgets in one panel share a key.
    DuplicateWidgetKey { panel: String, key: String },
    /// Two panels in one menu share a key.
    DuplicatePanelKey(String),
    /// The panel's default selectable names no widget in that panel.
    UnknownDefaultSelectable { panel: String, key: String },
    /// The menu has no panels at all.
    NoPanels,
    /// The main panel key names no panel in the menu.
    UnknownMainPanel(String),
    /// A slider with `min > max` (or a NaN bound).
    InvalidRange { key: String, min: f32, max: f32 },
    /// An option select with nothing to choose from.
    EmptyOptions { key: String },
    /// A default choice index past the end of the option list.
    DefaultIndexOutOfRange { key: String, index: usize, len: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyKey { what } => write!(f, "{what} key must not be empty"),
            ConfigError::DuplicateWidgetKey { panel, key } => {
                write!(f, "panel `{panel}` has more than one widget keyed `{key}`")
            }
            ConfigError::DuplicatePanelKey(key) => write!(f, "menu has more than one panel keyed `{key}`"),
            ConfigError::UnknownDefaultSelectable { panel, key } => {
                write!(f, "panel `{panel}` default selectable `{key}` is not one of its widgets")
            }
            ConfigError::NoPanels => write!(f, "menu has no panels"),
            ConfigError::UnknownMainPanel(key) => write!(f, "main panel `{key}` is not one of the menu's panels"),
            ConfigError::InvalidRange { key, min, max } => {
                write!(f, "slider `{key}` has an invalid range [{min}, {max}]")
            }
            ConfigError::EmptyOptions { key } => write!(f, "`{key}` has no options"),
            ConfigError::DefaultIndexOutOfRange { key, index, len } => {
                write!(f, "`{key}` default index {index} is out of range for {len} options")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
