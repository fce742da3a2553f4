use crate::error::ConfigError;
use crate::focus::ElementId;
use crate::navigation::NavigationCtx;
use crate::panel::PanelManager;

use super::widget::{IntoWidgetConfig, WidgetConfig};
use super::PrefabId;

pub type PanelCallback = Box<dyn FnMut(&mut PanelManager)>;
pub type PanelCreationCallback = Box<dyn FnOnce(&mut PanelManager)>;
/// Picks the default selectable at creation time, given the panel and its
/// selectables in order.
pub type DefaultSelectableCallback = Box<dyn FnOnce(&PanelManager, &[ElementId]) -> Option<ElementId>>;
pub type CustomNavigation = Box<dyn FnOnce(&mut NavigationCtx<'_>)>;

/// How a panel links its selectables for directional input.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum NavigationMode {
    /// Up/down follow insertion order.
    #[default]
    Vertical,
    /// Left/right follow insertion order.
    Horizontal,
    /// The panel's custom navigation callback does all the linking.
    Custom,
    /// No explicit links; the focus system guesses from registration order.
    AutomaticEngine,
}

/// A named, non-interactive object shown and hidden with its panel
/// (a background, a title banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementalObject {
    pub name: String,
}

impl SupplementalObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A validated panel description.
pub struct PanelConfig {
    pub key: String,
    /// Always names one of `widgets` when set.
    pub default_selectable_key: Option<String>,
    pub default_selectable_callback: Option<DefaultSelectableCallback>,
    pub widgets: Vec<WidgetConfig>,
    pub supplemental: Vec<SupplementalObject>,
    pub navigation: NavigationMode,
    /// Wrap from the last selectable to the first (vertical/horizontal only).
    pub wrap_navigation: bool,
    pub custom_navigation: Option<CustomNavigation>,
    pub prefab_override: Option<PrefabId>,
    pub creation_callback: Option<PanelCreationCallback>,
    pub display_callback: Option<PanelCallback>,
}

// ── PanelBuilder ──────────────────────────────────────────────────────────

/// Accumulates a panel description; validates in [`build`](Self::build).
///
/// # Example
/// ```rust,ignore
/// PanelBuilder::new("options")
///     .add_widget(ButtonBuilder::new("back").text("Back"))
///     .add_default_widget(SliderBuilder::new("volume", 0.0, 1.0, 0.8).text("Volume"))
///     .build()?
/// ```
pub struct PanelBuilder {
    key: String,
    default_selectable_key: Option<String>,
    default_selectable_callback: Option<DefaultSelectableCallback>,
    widgets: Vec<Result<WidgetConfig, ConfigError>>,
    supplemental: Vec<SupplementalObject>,
    navigation: NavigationMode,
    wrap_navigation: bool,
    custom_navigation: Option<CustomNavigation>,
    prefab_override: Option<PrefabId>,
    creation_callback: Option<PanelCreationCallback>,
    display_callback: Option<PanelCallback>,
}

impl PanelBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_selectable_key: None,
            default_selectable_callback: None,
            widgets: Vec::new(),
            supplemental: Vec::new(),
            navigation: NavigationMode::Vertical,
            wrap_navigation: false,
            custom_navigation: None,
            prefab_override: None,
            creation_callback: None,
            display_callback: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn add_widget(mut self, widget: impl IntoWidgetConfig) -> Self {
        self.widgets.push(widget.into_widget_config());
        self
    }

    /// Adds a widget and makes it the panel's default selectable.
    pub fn add_default_widget(mut self, widget: impl IntoWidgetConfig) -> Self {
        let widget = widget.into_widget_config();
        if let Ok(cfg) = &widget {
            self.default_selectable_key = Some(cfg.key().to_string());
        }
        self.widgets.push(widget);
        self
    }

    /// Inserts at `index`, clamped to the current widget count.
    pub fn insert_widget(mut self, index: usize, widget: impl IntoWidgetConfig) -> Self {
        let index = index.min(self.widgets.len());
        self.widgets.insert(index, widget.into_widget_config());
        self
    }

    pub fn insert_default_widget(mut self, index: usize, widget: impl IntoWidgetConfig) -> Self {
        let widget = widget.into_widget_config();
        if let Ok(cfg) = &widget {
            self.default_selectable_key = Some(cfg.key().to_string());
        }
        let index = index.min(self.widgets.len());
        self.widgets.insert(index, widget);
        self
    }

    pub fn default_selectable_key(mut self, key: impl Into<String>) -> Self {
        self.default_selectable_key = Some(key.into());
        self
    }

    /// Overrides the default selectable with whatever `f` returns at creation.
    pub fn default_selectable(
        mut self,
        f: impl FnOnce(&PanelManager, &[ElementId]) -> Option<ElementId> + 'static,
    ) -> Self {
        self.default_selectable_callback = Some(Box::new(f));
        self
    }

    pub fn add_supplemental(mut self, object: SupplementalObject) -> Self {
        self.supplemental.push(object);
        self
    }

    pub fn navigation(mut self, mode: NavigationMode) -> Self {
        self.navigation = mode;
        self
    }

    pub fn wrap_navigation(mut self, v: bool) -> Self {
        self.wrap_navigation = v;
        self
    }

    /// Switches to [`NavigationMode::Custom`] with `f` doing the linking.
    pub fn custom_navigation(mut self, f: impl FnOnce(&mut NavigationCtx<'_>) + 'static) -> Self {
        self.navigation = NavigationMode::Custom;
        self.custom_navigation = Some(Box::new(f));
        self
    }

    pub fn prefab_override(mut self, prefab: PrefabId) -> Self {
        self.prefab_override = Some(prefab);
        self
    }

    pub fn on_create(mut self, f: impl FnOnce(&mut PanelManager) + 'static) -> Self {
        self.creation_callback = Some(Box::new(f));
        self
    }

    pub fn on_display(mut self, f: impl FnMut(&mut PanelManager) + 'static) -> Self {
        self.display_callback = Some(Box::new(f));
        self
    }

    /// Validates keys and fills the default selectable (first widget) when unset.
    pub fn build(self) -> Result<PanelConfig, ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey { what: "panel" });
        }
        let widgets = self.widgets.into_iter().collect::<Result<Vec<_>, _>>()?;

        for (i, w) in widgets.iter().enumerate() {
            if widgets[..i].iter().any(|other| other.key() == w.key()) {
                return Err(ConfigError::DuplicateWidgetKey { panel: self.key, key: w.key().to_string() });
            }
        }

        let default_selectable_key = match self.default_selectable_key {
            Some(key) if widgets.iter().any(|w| w.key() == key) => Some(key),
            Some(key) => return Err(ConfigError::UnknownDefaultSelectable { panel: self.key, key }),
            None => widgets.first().map(|w| w.key().to_string()),
        };

        if self.navigation == NavigationMode::Custom && self.custom_navigation.is_none() {
            log::warn!("panel `{}` uses custom navigation without a callback; it will have no links", self.key);
        }

        Ok(PanelConfig {
            key: self.key,
            default_selectable_key,
            default_selectable_callback: self.default_selectable_callback,
            widgets,
            supplemental: self.supplemental,
            navigation: self.navigation,
            wrap_navigation: self.wrap_navigation,
            custom_navigation: self.custom_navigation,
            prefab_override: self.prefab_override,
            creation_callback: self.creation_callback,
            display_callback: self.display_callback,
        })
    }
}

// ── IntoPanelConfig ───────────────────────────────────────────────────────

/// Anything a menu builder accepts as a panel.
pub trait IntoPanelConfig {
    fn into_panel_config(self) -> Result<PanelConfig, ConfigError>;
}

impl IntoPanelConfig for PanelConfig {
    fn into_panel_config(self) -> Result<PanelConfig, ConfigError> {
        Ok(self)
    }
}

impl IntoPanelConfig for PanelBuilder {
    fn into_panel_config(self) -> Result<PanelConfig, ConfigError> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::widget::{ButtonBuilder, SliderBuilder, TextBuilder};

    fn keys(cfg: &PanelConfig) -> Vec<&str> {
        cfg.widgets.iter().map(|w| w.key()).collect()
    }

    #[test]
    fn default_selectable_is_first_widget() {
        let cfg = PanelBuilder::new("main")
            .add_widget(ButtonBuilder::new("play"))
            .add_widget(ButtonBuilder::new("quit"))
            .build()
            .unwrap();
        assert_eq!(cfg.default_selectable_key.as_deref(), Some("play"));
        assert_eq!(cfg.navigation, NavigationMode::Vertical);
    }

    #[test]
    fn empty_panel_has_no_default() {
        let cfg = PanelBuilder::new("empty").build().unwrap();
        assert!(cfg.default_selectable_key.is_none());
    }

    #[test]
    fn add_default_widget_wins() {
        let cfg = PanelBuilder::new("options")
            .add_widget(ButtonBuilder::new("back"))
            .add_default_widget(SliderBuilder::new("volume", 0.0, 1.0, 0.5))
            .build()
            .unwrap();
        assert_eq!(cfg.default_selectable_key.as_deref(), Some("volume"));
    }

    #[test]
    fn insert_widget_clamps_index() {
        let cfg = PanelBuilder::new("p")
            .add_widget(ButtonBuilder::new("a"))
            .insert_widget(0, ButtonBuilder::new("first"))
            .insert_widget(99, TextBuilder::new("last", "x"))
            .build()
            .unwrap();
        assert_eq!(keys(&cfg), vec!["first", "a", "last"]);
        assert_eq!(cfg.default_selectable_key.as_deref(), Some("first"));
    }

    #[test]
    fn duplicate_widget_key_rejected() {
        let err = PanelBuilder::new("p")
            .add_widget(ButtonBuilder::new("x"))
            .add_widget(ButtonBuilder::new("x"))
            .build()
            .err();
        assert_eq!(err, Some(ConfigError::DuplicateWidgetKey { panel: "p".into(), key: "x".into() }));
    }

    #[test]
    fn unknown_default_key_rejected() {
        let err = PanelBuilder::new("p")
            .add_widget(ButtonBuilder::new("x"))
            .default_selectable_key("nope")
            .build()
            .err();
        assert!(matches!(err, Some(ConfigError::UnknownDefaultSelectable { .. })));
    }

    #[test]
    fn widget_errors_propagate() {
        let err = PanelBuilder::new("p").add_widget(SliderBuilder::new("s", 2.0, 1.0, 1.5)).build().err();
        assert!(matches!(err, Some(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn custom_navigation_sets_mode() {
        let cfg = PanelBuilder::new("p").custom_navigation(|_| {}).build().unwrap();
        assert_eq!(cfg.navigation, NavigationMode::Custom);
        assert!(cfg.custom_navigation.is_some());
    }
}
