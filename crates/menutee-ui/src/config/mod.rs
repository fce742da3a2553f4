//! Declarative menu descriptions.
//!
//! Builders accumulate fields and only validate (and fill defaults) in
//! `build()`. Nothing here creates live widgets; that is the generator's job.
//!
//! ```text
//! MenuBuilder ─┬─ PanelBuilder ─┬─ ButtonBuilder
//!              │                ├─ SliderBuilder (fixed or bound)
//!              │                └─ ...
//!              └─ PanelBuilder ── ...
//! ```

pub mod menu;
pub mod panel;
pub mod widget;

pub use menu::{
    DefaultSelectMode, MenuBuilder, MenuConfig, MenuSettings, PanelChangeCallback,
    SelectionRestorationMode,
};
pub use panel::{
    CustomNavigation, IntoPanelConfig, NavigationMode, PanelBuilder, PanelConfig,
    SupplementalObject,
};
pub use widget::{
    ButtonBuilder, ButtonSpec, DropdownBuilder, DropdownSpec, IntoWidgetConfig, OptionSelectBuilder,
    OptionSelectSpec, OptionValue, SliderBuilder, SliderSpec, TextBuilder, TextSpec, ToggleBuilder,
    ToggleSpec, ValueSource, WidgetBuilder, WidgetConfig, WidgetInit, WidgetKind, WidgetSpec,
};

use std::fmt;

/// Names a visual template a widget or panel should be instantiated from.
///
/// Opaque to the menu layer; only a [`crate::factory::WidgetFactory`] gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefabId(String);

impl PrefabId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrefabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
